//! Error types for figure baking operations.

use thiserror::Error;

/// Errors that can occur while enumerating, encoding, dispatching or
/// compositing panels.
#[derive(Debug, Error)]
pub enum FigureError {
    /// A parameter domain has an empty value sequence.
    #[error("parameter domain '{name}' has no values")]
    EmptyDomain { name: String },

    /// Two domains share the same parameter name.
    #[error("duplicate parameter domain '{name}'")]
    DuplicateParameter { name: String },

    /// A domain's default value is not a member of its value sequence.
    #[error("default value for '{name}' is not one of its values")]
    DefaultNotInValues { name: String },

    /// A control was constructed with inconsistent arguments.
    #[error("invalid control '{name}': {message}")]
    InvalidControl { name: String, message: String },

    /// A selection does not cover every domain.
    #[error("selection is missing a value for parameter '{missing}'")]
    IncompleteCombination { missing: String },

    /// A selection names a parameter no domain defines.
    #[error("selection names unknown parameter '{name}'")]
    UnknownParameter { name: String },

    /// The render collaborator failed for one combination.
    #[error("render failed for combination '{key}': {message}")]
    RenderFailed { key: String, message: String },

    /// Artifact post-processing failed.
    #[error("artifact post-processing failed for '{key}': {message}")]
    PostProcessFailed { key: String, message: String },

    /// No panel's key matches the all-defaults key. Indicates an
    /// encoder/enumerator inconsistency, never a transient condition.
    #[error("no panel matches default key '{default_key}'")]
    NoMatchingDefaultPanel { default_key: String },

    /// Grid label rasterization failed; aborts composition.
    #[error("failed to render panel label '{label}': {message}")]
    LabelRenderFailed { label: String, message: String },

    /// A panel artifact could not be decoded for composition.
    #[error("failed to decode artifact for panel '{key}': {message}")]
    ArtifactDecode { key: String, message: String },

    /// Invalid grid geometry (zero panels per row, no panels).
    #[error("invalid grid: {message}")]
    InvalidGrid { message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for figure operations.
pub type Result<T> = std::result::Result<T, FigureError>;
