#![allow(dead_code)]

use ifig_core::BoxError;
use ifig_model::{Combination, ParameterDomain, RenderOutput, Value};

/// Minimal external-control stand-in for tests.
pub struct StubDomain {
    pub name: &'static str,
    pub values: Vec<Value>,
    pub default: Value,
}

impl StubDomain {
    pub fn numeric(name: &'static str, values: &[f64]) -> Self {
        Self {
            name,
            values: values.iter().map(|v| Value::Numeric(*v)).collect(),
            default: Value::Numeric(values[0]),
        }
    }

    pub fn text(name: &'static str, values: &[&str]) -> Self {
        Self {
            name,
            values: values.iter().map(|v| Value::from(*v)).collect(),
            default: Value::from(values[0]),
        }
    }
}

impl ParameterDomain for StubDomain {
    fn name(&self) -> &str {
        self.name
    }

    fn values(&self) -> Vec<Value> {
        self.values.clone()
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }
}

/// A renderer that emits a distinct, deterministic artifact per combination.
pub fn stub_renderer() -> impl FnMut(&Combination) -> Result<RenderOutput, BoxError> {
    |combination: &Combination| {
        let mut caption = String::from("panel:");
        for (name, value) in combination.entries() {
            caption.push(' ');
            caption.push_str(name);
            caption.push('=');
            caption.push_str(&value.to_string());
        }
        Ok(RenderOutput {
            artifact: caption.clone().into_bytes(),
            caption,
        })
    }
}
