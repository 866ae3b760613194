//! Parameter domains and combinations.

use crate::error::{FigureError, Result};
use crate::value::Value;

/// One named, ordered, finite sequence of selectable values plus a default.
///
/// Implemented by external control objects (range sliders, radio groups,
/// dropdowns). The core only reads domains; it never constructs or mutates
/// them. Sequence order matters for display but not for key computation.
pub trait ParameterDomain {
    /// Parameter name. Significant for key ordering (case-insensitive sort,
    /// ties by raw byte order).
    fn name(&self) -> &str;

    /// The ordered value sequence. Must be non-empty.
    fn values(&self) -> Vec<Value>;

    /// The default selection. Must be a member of `values()`.
    fn default_value(&self) -> Value;

    /// Checks the domain invariants.
    fn validate(&self) -> Result<()> {
        let values = self.values();
        if values.is_empty() {
            return Err(FigureError::EmptyDomain {
                name: self.name().to_string(),
            });
        }
        let default = self.default_value();
        if !values.contains(&default) {
            return Err(FigureError::DefaultNotInValues {
                name: self.name().to_string(),
            });
        }
        Ok(())
    }
}

/// One concrete assignment of exactly one value per parameter domain.
///
/// Entries are held in canonical (sorted-name) order; combinations are
/// transient and exist only between enumeration and dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    entries: Vec<(String, Value)>,
}

impl Combination {
    /// Builds a combination from entries already in canonical order.
    pub fn new(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Looks up the value selected for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
