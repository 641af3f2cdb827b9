//! Boolean coercion configuration.

use serde::{Deserialize, Serialize};

use crate::types::coercion::{DEFAULT_FALSY, DEFAULT_TRUTHY};
use crate::types::{BoolCoercion, NumericBoolRule};

/// Overrides for the tri-state boolean coercion table. Unset lists keep the
/// built-in representations.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BooleanConfig {
    pub truthy: Option<Vec<String>>,
    pub falsy: Option<Vec<String>>,
    pub numeric: Option<NumericBoolRule>,
}

impl BooleanConfig {
    pub fn effective_truthy(&self) -> Vec<String> {
        self.truthy
            .clone()
            .unwrap_or_else(|| DEFAULT_TRUTHY.map(String::from).to_vec())
    }

    pub fn effective_falsy(&self) -> Vec<String> {
        self.falsy
            .clone()
            .unwrap_or_else(|| DEFAULT_FALSY.map(String::from).to_vec())
    }

    pub fn to_coercion(&self) -> BoolCoercion {
        BoolCoercion::new(
            self.effective_truthy(),
            self.effective_falsy(),
            self.numeric.unwrap_or_default(),
        )
    }
}
