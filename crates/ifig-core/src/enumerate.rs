//! Cartesian enumeration of parameter domains.

use ifig_model::{Combination, FigureError, ParameterDomain, Result};

use crate::key::name_order;

/// Produces the full cross product of every domain's value sequence.
///
/// Domains are first sorted by the same name ordering the key encoder uses;
/// the last-sorted domain varies fastest (odometer order). The result is a
/// pure function of the domain definitions: an identical domain set yields
/// an identical sequence on every call.
///
/// Fails with `EmptyDomain` if any domain has no values; the full product
/// is materialized eagerly, so callers are responsible for keeping the
/// parameter space small.
pub fn enumerate(domains: &[&dyn ParameterDomain]) -> Result<Vec<Combination>> {
    let mut sorted: Vec<&dyn ParameterDomain> = domains.to_vec();
    sorted.sort_by(|a, b| name_order(a.name(), b.name()));
    for pair in sorted.windows(2) {
        if pair[0].name() == pair[1].name() {
            return Err(FigureError::DuplicateParameter {
                name: pair[0].name().to_string(),
            });
        }
    }
    for domain in &sorted {
        domain.validate()?;
    }

    let names: Vec<String> = sorted.iter().map(|d| d.name().to_string()).collect();
    let value_sets: Vec<_> = sorted.iter().map(|d| d.values()).collect();
    let total: usize = value_sets.iter().map(Vec::len).product();

    let mut combinations = Vec::with_capacity(total);
    let mut indices = vec![0usize; value_sets.len()];
    loop {
        let entries = names
            .iter()
            .zip(&value_sets)
            .zip(&indices)
            .map(|((name, values), &i)| (name.clone(), values[i].clone()))
            .collect();
        combinations.push(Combination::new(entries));

        // Odometer increment, last domain fastest.
        let mut position = indices.len();
        loop {
            if position == 0 {
                return Ok(combinations);
            }
            position -= 1;
            indices[position] += 1;
            if indices[position] < value_sets[position].len() {
                break;
            }
            indices[position] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifig_model::Value;

    struct Domain {
        name: &'static str,
        values: Vec<Value>,
    }

    impl ParameterDomain for Domain {
        fn name(&self) -> &str {
            self.name
        }

        fn values(&self) -> Vec<Value> {
            self.values.clone()
        }

        fn default_value(&self) -> Value {
            self.values[0].clone()
        }
    }

    #[test]
    fn last_sorted_domain_varies_fastest() {
        let a = Domain {
            name: "a",
            values: vec![Value::Numeric(1.0), Value::Numeric(2.0)],
        };
        let b = Domain {
            name: "b",
            values: vec!["x".into(), "y".into()],
        };
        // Registration order must not matter.
        let combos = enumerate(&[&b, &a]).expect("enumerate");
        let picks: Vec<(f64, &str)> = combos
            .iter()
            .map(|c| {
                (
                    c.get("a").and_then(Value::as_numeric).expect("a"),
                    c.get("b").and_then(Value::as_text).expect("b"),
                )
            })
            .collect();
        assert_eq!(
            picks,
            vec![(1.0, "x"), (1.0, "y"), (2.0, "x"), (2.0, "y")]
        );
    }

    #[test]
    fn empty_domain_is_rejected() {
        let a = Domain {
            name: "a",
            values: vec![Value::Numeric(1.0)],
        };
        let empty = Domain {
            name: "b",
            values: vec![],
        };
        let error = enumerate(&[&a, &empty]).expect_err("empty domain");
        assert!(matches!(error, FigureError::EmptyDomain { name } if name == "b"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let a = Domain {
            name: "a",
            values: vec![Value::Numeric(1.0)],
        };
        let also_a = Domain {
            name: "a",
            values: vec![Value::Numeric(2.0)],
        };
        let error = enumerate(&[&a, &also_a]).expect_err("duplicate");
        assert!(matches!(error, FigureError::DuplicateParameter { name } if name == "a"));
    }
}
