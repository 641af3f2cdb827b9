//! Query: one named, parameterized invocation of a query source.

use std::sync::Arc;

use super::key::StoreKey;
use crate::shape::TypedRow;
use crate::types::{DataType, Value};

/// One parameter binding. A parameter without a value is carried but never bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: Option<Value>,
    declared: Option<DataType>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            declared: None,
        }
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            declared: None,
        }
    }

    /// Declare the semantic type the backend conversion table should apply.
    pub fn typed(mut self, data_type: DataType) -> Self {
        self.declared = Some(data_type);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn declared_type(&self) -> Option<DataType> {
        self.declared
    }
}

/// A named invocation with ordered parameters, an optional composite key and
/// an optional static row shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    name: String,
    params: Vec<Parameter>,
    key: Option<StoreKey>,
    row_shape: Option<Arc<str>>,
}

impl Query {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            key: None,
            row_shape: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push(Parameter::new(name, value));
        self
    }

    pub fn with_typed_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        data_type: DataType,
    ) -> Self {
        self.params.push(Parameter::new(name, value).typed(data_type));
        self
    }

    pub fn with_unbound(mut self, name: impl Into<String>) -> Self {
        self.params.push(Parameter::unbound(name));
        self
    }

    pub fn with_parameter(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_key(mut self, key: StoreKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Declare the static row shape by its registered identity.
    pub fn with_row_shape(mut self, shape: impl Into<Arc<str>>) -> Self {
        self.row_shape = Some(shape.into());
        self
    }

    pub fn with_typed_row<T: TypedRow>(self) -> Self {
        self.with_row_shape(T::SHAPE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Parameters carrying a value, in declaration order.
    pub fn bound_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.has_value())
    }

    pub fn key(&self) -> Option<&StoreKey> {
        self.key.as_ref()
    }

    pub fn row_shape(&self) -> Option<&Arc<str>> {
        self.row_shape.as_ref()
    }
}
