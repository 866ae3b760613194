//! Canonical key encoding.
//!
//! A key is the concatenation of `name + formatted-value` pairs in
//! sorted-name order with no separators. The same rule is applied by the
//! client-side script baked into the interactive document, so every detail
//! here is load-bearing: the name ordering, the numeric format and the
//! absence of delimiters must all be reproduced bit-for-bit by a second
//! implementation that only sees live control values.

use std::cmp::Ordering;
use std::collections::HashMap;

use ifig_model::{CanonicalKey, Combination, FigureError, ParameterDomain, Result, Value};

/// Canonical parameter-name ordering: case-insensitive ascending, ties
/// broken by raw byte order.
pub fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Formats a numeric value for key computation: scientific notation with
/// six fractional mantissa digits and a signed, zero-padded exponent of
/// minimum width two (`0.1` -> `1.000000e-01`).
///
/// This is the one format both this encoder and a browser-side
/// `toExponential(6)` (with the exponent padded) reproduce exactly, which
/// sidesteps precision-dependent divergence such as `0.1` printing as
/// `0.10000000000000001` elsewhere.
pub fn format_numeric(value: f64) -> String {
    let formatted = format!("{value:.6e}");
    // Non-finite values carry no exponent; pass them through.
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    format!("{mantissa}e{exponent:+03}")
}

/// The key representation of a single value. Text passes through
/// unmodified, with no escaping; see the crate docs for the resulting
/// collision caveat.
pub fn key_repr(value: &Value) -> String {
    match value {
        Value::Numeric(n) => format_numeric(*n),
        Value::Text(s) => s.clone(),
    }
}

/// Encodes a full selection (one value per domain) into its canonical key.
///
/// The selection must cover every domain exactly: a missing parameter is an
/// `IncompleteCombination`, an extra one an `UnknownParameter`. Pure and
/// stable across processes for a fixed set of domains.
pub fn encode(
    domains: &[&dyn ParameterDomain],
    selection: &HashMap<String, Value>,
) -> Result<CanonicalKey> {
    let names = sorted_names(domains)?;
    for name in selection.keys() {
        if !names.iter().any(|n| n == name) {
            return Err(FigureError::UnknownParameter { name: name.clone() });
        }
    }
    let mut key = String::new();
    for name in &names {
        let value = selection
            .get(*name)
            .ok_or_else(|| FigureError::IncompleteCombination {
                missing: (*name).to_string(),
            })?;
        key.push_str(name);
        key.push_str(&key_repr(value));
    }
    Ok(CanonicalKey::new(key))
}

/// Encodes a combination whose entries are already in canonical order, as
/// produced by the enumerator.
pub fn encode_combination(combination: &Combination) -> CanonicalKey {
    let mut key = String::new();
    for (name, value) in combination.entries() {
        key.push_str(name);
        key.push_str(&key_repr(value));
    }
    CanonicalKey::new(key)
}

/// The key of the all-defaults combination.
pub fn default_key(domains: &[&dyn ParameterDomain]) -> Result<CanonicalKey> {
    let defaults: HashMap<String, Value> = domains
        .iter()
        .map(|domain| (domain.name().to_string(), domain.default_value()))
        .collect();
    encode(domains, &defaults)
}

/// Domain names in canonical order, rejecting duplicates.
pub(crate) fn sorted_names<'a>(domains: &[&'a dyn ParameterDomain]) -> Result<Vec<&'a str>> {
    let mut names: Vec<&str> = domains.iter().map(|domain| domain.name()).collect();
    names.sort_by(|a, b| name_order(a, b));
    for pair in names.windows(2) {
        if pair[0] == pair[1] {
            return Err(FigureError::DuplicateParameter {
                name: pair[0].to_string(),
            });
        }
    }
    Ok(names)
}
