//! Backend-neutral bound parameters, produced by binding and consumed by
//! the backend conversion pass.

use crate::errors::BindingError;
use crate::types::{DataType, Value};

/// One named parameter ready for backend conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    pub name: String,
    pub value: Value,
    pub declared: Option<DataType>,
}

impl BoundParameter {
    /// The type the conversion table keys on: the declared type, else the value's own.
    pub fn semantic_type(&self) -> DataType {
        self.declared.unwrap_or_else(|| self.value.data_type())
    }
}

/// Ordered parameter collection with unique (case-insensitive) names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParameters {
    params: Vec<BoundParameter>,
}

impl BoundParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        name: impl Into<String>,
        value: Value,
        declared: Option<DataType>,
    ) -> Result<(), BindingError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(BindingError::DuplicateParameter { name });
        }
        self.params.push(BoundParameter {
            name,
            value,
            declared,
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// `base` if free, else the first free `base_1`, `base_2`, ...
    pub fn unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    pub fn get(&self, name: &str) -> Option<&BoundParameter> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundParameter> {
        self.params.iter()
    }
}

impl<'a> IntoIterator for &'a BoundParameters {
    type Item = &'a BoundParameter;
    type IntoIter = std::slice::Iter<'a, BoundParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
