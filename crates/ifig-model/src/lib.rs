pub mod domain;
pub mod error;
pub mod panel;
pub mod value;

pub use domain::{Combination, ParameterDomain};
pub use error::{FigureError, Result};
pub use panel::{CanonicalKey, Panel, RenderOutput};
pub use value::Value;
