//! Tri-state boolean coercion table.
//!
//! Backends disagree on how booleans come back: integers, single bytes,
//! `'Y'`/`'N'`, `'true'`/`'false'`. The table is data, so each store can
//! configure the representations its schema uses.

use serde::{Deserialize, Serialize};

use super::value::{Tristate, Value};

/// Text representations read as true by default.
pub const DEFAULT_TRUTHY: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];

/// Text representations read as false by default.
pub const DEFAULT_FALSY: [&str; 6] = ["false", "f", "no", "n", "off", "0"];

/// How numeric raw values map onto booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericBoolRule {
    /// 0 is false, anything else is true.
    #[default]
    NonZero,
    /// 0 is false, 1 is true, anything else is unknown.
    Strict,
}

/// Configurable coercion of raw backend values into `Tristate`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolCoercion {
    truthy: Vec<String>,
    falsy: Vec<String>,
    numeric: NumericBoolRule,
}

impl Default for BoolCoercion {
    fn default() -> Self {
        Self::new(DEFAULT_TRUTHY, DEFAULT_FALSY, NumericBoolRule::NonZero)
    }
}

impl BoolCoercion {
    /// Build a table. Text representations are matched case-insensitively
    /// after trimming.
    pub fn new<S: AsRef<str>>(
        truthy: impl IntoIterator<Item = S>,
        falsy: impl IntoIterator<Item = S>,
        numeric: NumericBoolRule,
    ) -> Self {
        let normalize = |s: S| s.as_ref().trim().to_lowercase();
        Self {
            truthy: truthy.into_iter().map(normalize).collect(),
            falsy: falsy.into_iter().map(normalize).collect(),
            numeric,
        }
    }

    pub fn numeric_rule(&self) -> NumericBoolRule {
        self.numeric
    }

    /// Coerce a raw value. NULL and unrecognized representations are `Unknown`.
    pub fn coerce(&self, raw: &Value) -> Tristate {
        match raw {
            Value::Null => Tristate::Unknown,
            Value::Bool(b) => Tristate::from(*b),
            Value::Integer(i) => self.coerce_number(*i as f64),
            Value::Real(r) => self.coerce_number(*r),
            Value::Text(s) | Value::Enum(s) => self.coerce_text(s),
            Value::Blob(b) if b.len() == 1 => self.coerce_number(f64::from(b[0])),
            _ => Tristate::Unknown,
        }
    }

    fn coerce_number(&self, n: f64) -> Tristate {
        if n.is_nan() {
            return Tristate::Unknown;
        }
        match self.numeric {
            NumericBoolRule::NonZero => Tristate::from(n != 0.0),
            NumericBoolRule::Strict if n == 0.0 => Tristate::False,
            NumericBoolRule::Strict if n == 1.0 => Tristate::True,
            NumericBoolRule::Strict => Tristate::Unknown,
        }
    }

    fn coerce_text(&self, s: &str) -> Tristate {
        let s = s.trim().to_lowercase();
        if self.truthy.iter().any(|t| *t == s) {
            Tristate::True
        } else if self.falsy.iter().any(|f| *f == s) {
            Tristate::False
        } else {
            Tristate::Unknown
        }
    }
}
