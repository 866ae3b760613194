//! Interactive figure documents: every parameter combination is rendered
//! ahead of time and baked into one self-contained HTML file; a small
//! embedded script re-derives the canonical key from live control state
//! and toggles the matching panel visible.

pub mod controls;
pub mod document;
pub mod escape;

pub use controls::{Control, DropdownControl, RadioControl, RangeControl};
pub use document::{
    DocumentOptions, build_html, build_html_with, render_document, save_standalone_html,
};
pub use escape::escape_html;
