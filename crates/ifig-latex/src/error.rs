//! Error types for LaTeX rasterization.

use thiserror::Error;

/// Errors surfaced by the rasterization cache. Toolchain diagnostics are
/// preserved verbatim together with the offending input, never swallowed.
#[derive(Debug, Error)]
pub enum LatexError {
    /// The external tool binary is not installed or not on PATH.
    #[error("failed to rasterize {input:?}: {program} could not be found")]
    CompilerNotFound { program: String, input: String },

    /// The external tool ran but reported failure.
    #[error("{program} was not able to process {input:?}:\n{diagnostics}")]
    CompileFailed {
        program: String,
        input: String,
        diagnostics: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rasterization operations.
pub type Result<T> = std::result::Result<T, LatexError>;
