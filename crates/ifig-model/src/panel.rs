//! Canonical keys, panels and render outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The deterministic string identifying one combination within an
/// enumeration session.
///
/// Built by concatenating `name + formatted-value` pairs in sorted-name
/// order with no separators; a disconnected client-side re-encoder must be
/// able to reproduce it from live control values alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What the external render collaborator returns for one combination.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Rendered artifact bytes (PNG).
    pub artifact: Vec<u8>,
    /// Human-readable caption for the panel.
    pub caption: String,
}

/// One precomputed panel: rendered artifact, its key, caption and
/// visibility flag. Immutable after dispatch except for `visible`, which is
/// true for exactly one panel per document.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub key: CanonicalKey,
    pub artifact: Vec<u8>,
    pub caption: String,
    pub visible: bool,
}
