//! Static multi-panel grid composition.
//!
//! Consumes dispatched panels (or an explicit subset in caller order) and
//! lays them out row-major into one raster image, independent of the
//! interactive toggling mechanism. Pure with respect to its inputs except
//! for the final file write.

pub mod compose;

pub use compose::{ComposedGrid, GridOptions, compose, compose_to_file};
