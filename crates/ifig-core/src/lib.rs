//! Combinatorial precomputation engine for baked interactive figures.
//!
//! Three stages, all pure with respect to their inputs:
//!
//! - [`key`]: deterministic canonical-key encoding, reproducible by a
//!   disconnected client-side implementation.
//! - [`enumerate`]: the full cartesian product of all parameter domains in
//!   a fixed, name-sorted order.
//! - [`dispatch`]: one render call per combination, wrapped into keyed
//!   panels with exactly one (the default) marked visible.
//!
//! Keys concatenate name/value pairs with no delimiter. Adjacent fields can
//! therefore collide when names and text values share character sequences
//! (`("a1", "b")` vs `("a", "1b")`); the behavior is kept because any
//! delimiter scheme would have to be mirrored bit-for-bit by the client
//! re-encoder baked into existing documents.

pub mod dispatch;
pub mod enumerate;
pub mod key;

pub use dispatch::{
    BoxError, DispatchOptions, DispatchOutput, PanelRenderer, dispatch, dispatch_with,
};
pub use enumerate::enumerate;
pub use key::{default_key, encode, encode_combination, format_numeric, key_repr, name_order};
