//! LaTeX-to-raster rendering service: a content-addressable cache that
//! rasterizes text labels via `pdflatex` and ImageMagick.

pub mod cache;
pub mod error;

pub use cache::{LabelRasterizer, LatexCache};
pub use error::{LatexError, Result};
