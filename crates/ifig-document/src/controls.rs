//! Parameter controls: range slider, radio group, dropdown.
//!
//! Each control owns one parameter domain and emits its own markup. The
//! `value` attribute of a numeric option is written in the canonical key
//! format (`1.000000e-01`), and every option carries a `data-kind`
//! attribute, so the in-document script knows which live values to run
//! through the numeric formatter and which to take verbatim.

use ifig_core::{format_numeric, key_repr};
use ifig_model::{FigureError, ParameterDomain, Result, Value};

use crate::escape::escape_html;

/// A parameter domain that can render itself as an HTML control.
pub trait Control: ParameterDomain {
    /// Markup for this control, wired to `interactUpdate`.
    fn markup(&self) -> String;
}

fn display_name(name: &str) -> String {
    escape_html(&name.replace('_', " "))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Numeric(_) => "num",
        Value::Text(_) => "text",
    }
}

/// A slider over `min..=max` in steps of `step`.
///
/// Values are `min + i * step` for every step landing inside the range,
/// matching the arithmetic a browser applies when the thumb snaps; the
/// fixed-precision key format absorbs the accumulated float noise on both
/// sides.
pub struct RangeControl {
    name: String,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
    width: u32,
}

impl RangeControl {
    pub fn new(name: impl Into<String>, min: f64, max: f64, step: f64) -> Result<Self> {
        let name = name.into();
        if !step.is_finite() || step <= 0.0 {
            return Err(FigureError::InvalidControl {
                name,
                message: "step must be positive and finite".to_string(),
            });
        }
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(FigureError::InvalidControl {
                name,
                message: "bounds must be finite with min <= max".to_string(),
            });
        }
        Ok(Self {
            name,
            min,
            max,
            step,
            default: min,
            width: 350,
        })
    }

    /// Sets the default selection; must land on a step.
    ///
    /// Membership is judged by canonical key representation, not bit
    /// equality: `min + i * step` accumulates float error (step 3 of
    /// `0.1..=1.0` by `0.2` is `0.7000000000000001`), so a caller-supplied
    /// `0.7` must still match. The stored default is the generated value, so
    /// `default_value()` stays bit-identical to the enumerated one.
    pub fn with_default(mut self, default: f64) -> Result<Self> {
        let wanted = format_numeric(default);
        let matched = self.values().into_iter().find_map(|value| match value {
            Value::Numeric(n) if format_numeric(n) == wanted => Some(n),
            _ => None,
        });
        let Some(generated) = matched else {
            return Err(FigureError::DefaultNotInValues {
                name: self.name.clone(),
            });
        };
        self.default = generated;
        Ok(self)
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

impl ParameterDomain for RangeControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn values(&self) -> Vec<Value> {
        let steps = ((self.max - self.min) / self.step + 1e-9).floor() as i64;
        (0..=steps.max(0))
            .map(|i| Value::Numeric(self.min + i as f64 * self.step))
            .collect()
    }

    fn default_value(&self) -> Value {
        Value::Numeric(self.default)
    }
}

impl Control for RangeControl {
    fn markup(&self) -> String {
        format!(
            "<div class=\"wrap\"><div class=\"left\"><p><b>{param} =</b></p></div>\
             <div class=\"right\"><input type=\"range\" name=\"{name}\" data-kind=\"num\" \
             min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
             style=\"width:{width}px; max-width:100%;\" \
             oninput=\"interactUpdate(this.parentNode);\" \
             onchange=\"interactUpdate(this.parentNode);\"></div></div>",
            param = display_name(&self.name),
            name = escape_html(&self.name),
            min = self.min,
            max = self.max,
            step = self.step,
            value = key_repr(&self.default_value()),
            width = self.width,
        )
    }
}

/// A group of radio buttons, one per value.
pub struct RadioControl {
    name: String,
    values: Vec<Value>,
    labels: Vec<String>,
    default: Value,
}

impl RadioControl {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        let Some(default) = values.first().cloned() else {
            return Err(FigureError::EmptyDomain { name });
        };
        let labels = values.iter().map(|v| v.to_string()).collect();
        Ok(Self {
            name,
            values,
            labels,
            default,
        })
    }

    pub fn with_default(mut self, default: Value) -> Result<Self> {
        if !self.values.contains(&default) {
            return Err(FigureError::DefaultNotInValues {
                name: self.name.clone(),
            });
        }
        self.default = default;
        Ok(self)
    }

    /// Replaces the per-value display labels; must match the value count.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self> {
        if labels.len() != self.values.len() {
            return Err(FigureError::InvalidControl {
                name: self.name.clone(),
                message: "label count must match value count".to_string(),
            });
        }
        self.labels = labels;
        Ok(self)
    }
}

impl ParameterDomain for RadioControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn values(&self) -> Vec<Value> {
        self.values.clone()
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }
}

impl Control for RadioControl {
    fn markup(&self) -> String {
        let mut out = format!(
            "<div class=\"wrap\"><div class=\"left\"><p><b>{param} = </b></p></div><div class=\"right\">",
            param = display_name(&self.name),
        );
        for (value, label) in self.values.iter().zip(&self.labels) {
            let checked = if *value == self.default {
                " checked=\"checked\""
            } else {
                ""
            };
            out.push_str(&format!(
                "<input type=\"radio\" name=\"{name}\" data-kind=\"{kind}\" value=\"{value}\"{checked} \
                 onchange=\"interactUpdate(this.parentNode);\"> {label}\
                 <span class=\"cbseparator\"></span>",
                name = escape_html(&self.name),
                kind = kind(value),
                value = escape_html(&key_repr(value)),
                checked = checked,
                label = escape_html(label),
            ));
        }
        out.push_str("</div></div>");
        out
    }
}

/// A dropdown select, one option per value.
#[derive(Debug)]
pub struct DropdownControl {
    name: String,
    values: Vec<Value>,
    labels: Vec<String>,
    default: Value,
}

impl DropdownControl {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        let Some(default) = values.first().cloned() else {
            return Err(FigureError::EmptyDomain { name });
        };
        let labels = values.iter().map(|v| v.to_string()).collect();
        Ok(Self {
            name,
            values,
            labels,
            default,
        })
    }

    pub fn with_default(mut self, default: Value) -> Result<Self> {
        if !self.values.contains(&default) {
            return Err(FigureError::DefaultNotInValues {
                name: self.name.clone(),
            });
        }
        self.default = default;
        Ok(self)
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self> {
        if labels.len() != self.values.len() {
            return Err(FigureError::InvalidControl {
                name: self.name.clone(),
                message: "label count must match value count".to_string(),
            });
        }
        self.labels = labels;
        Ok(self)
    }
}

impl ParameterDomain for DropdownControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn values(&self) -> Vec<Value> {
        self.values.clone()
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }
}

impl Control for DropdownControl {
    fn markup(&self) -> String {
        let mut options = String::new();
        for (value, label) in self.values.iter().zip(&self.labels) {
            let selected = if *value == self.default {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                "<option value=\"{value}\" data-kind=\"{kind}\"{selected}>{label}</option>",
                value = escape_html(&key_repr(value)),
                kind = kind(value),
                selected = selected,
                label = escape_html(label),
            ));
        }
        format!(
            "<div class=\"wrap\"><div class=\"left\"><p><b>{param} =</b></p></div>\
             <div class=\"right\"> <select name=\"{name}\" \
             onchange=\"interactUpdate(this.parentNode);\"> {options}</select></div></div>",
            param = display_name(&self.name),
            name = escape_html(&self.name),
            options = options,
        )
    }
}
