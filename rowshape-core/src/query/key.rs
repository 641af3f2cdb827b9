//! Composite store keys.

use smallvec::SmallVec;

use crate::types::Value;

/// One column of a composite key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPart {
    pub column: String,
    pub value: Value,
}

/// Ordered composite key identifying one record. Order is significant: the
/// generated predicate references its parameters in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreKey {
    parts: SmallVec<[KeyPart; 2]>,
}

impl StoreKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parts.push(KeyPart {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyPart> {
        self.parts.iter()
    }
}

impl<C: Into<String>, V: Into<Value>> FromIterator<(C, V)> for StoreKey {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |key, (column, value)| key.with(column, value))
    }
}
