//! Schema and field definitions with per-target store policies.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::value::DataType;
use crate::constants::ANY_TARGET;

/// Per-target rule controlling whether a field is loaded, stored, both, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreFlag {
    #[default]
    LoadAndStore,
    OnlyLoad,
    OnlyStore,
    None,
}

impl StoreFlag {
    /// Parse a flag as written in a pragma header (case-insensitive, `-` or `_`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "load_and_store" | "loadandstore" => Some(Self::LoadAndStore),
            "only_load" | "onlyload" => Some(Self::OnlyLoad),
            "only_store" | "onlystore" => Some(Self::OnlyStore),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn loads(self) -> bool {
        matches!(self, Self::LoadAndStore | Self::OnlyLoad)
    }

    pub fn stores(self) -> bool {
        matches!(self, Self::LoadAndStore | Self::OnlyStore)
    }
}

/// Store policy for one field on one backend target (or on every target via `*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAttr {
    target: String,
    store_flag: StoreFlag,
}

impl FieldAttr {
    pub fn new(target: impl Into<String>, store_flag: StoreFlag) -> Self {
        Self {
            target: target.into(),
            store_flag,
        }
    }

    /// An attribute applying to every target without a more specific one.
    pub fn any_target(store_flag: StoreFlag) -> Self {
        Self::new(ANY_TARGET, store_flag)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn store_flag(&self) -> StoreFlag {
        self.store_flag
    }

    pub fn is_any_target(&self) -> bool {
        self.target == ANY_TARGET
    }
}

/// One field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: String,
    order: usize,
    data_type: DataType,
    attrs: SmallVec<[FieldAttr; 2]>,
}

impl FieldDef {
    /// Create a field definition. The order is assigned when the field is
    /// placed into a `Schema`.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            order: 0,
            data_type,
            attrs: SmallVec::new(),
        }
    }

    pub fn with_attr(mut self, attr: FieldAttr) -> Self {
        self.attrs.push(attr);
        self
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = FieldAttr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_boolean(&self) -> bool {
        self.data_type == DataType::Boolean
    }

    pub fn attrs(&self) -> &[FieldAttr] {
        &self.attrs
    }

    /// The attribute governing `target`: an exact (case-insensitive) target
    /// match wins over the `*` attribute.
    pub fn attr_for(&self, target: &str) -> Option<&FieldAttr> {
        self.attrs
            .iter()
            .find(|a| a.target.eq_ignore_ascii_case(target))
            .or_else(|| self.attrs.iter().find(|a| a.is_any_target()))
    }

    /// True when the field has no policy for `target`, or its policy loads.
    pub fn loads_for(&self, target: &str) -> bool {
        self.attr_for(target)
            .map_or(true, |attr| attr.store_flag.loads())
    }
}

/// Ordered field definitions describing a result set or a row type.
///
/// Field orders are assigned on construction and are always `0..len`.
/// Name lookup is case-insensitive; when several fields share a name the
/// first one wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    read_only: bool,
    fields: Vec<FieldDef>,
    by_name: FxHashMap<String, usize>,
}

impl Schema {
    pub fn new(
        name: impl Into<String>,
        read_only: bool,
        fields: impl IntoIterator<Item = FieldDef>,
    ) -> Self {
        let mut by_name = FxHashMap::default();
        let fields: Vec<FieldDef> = fields
            .into_iter()
            .enumerate()
            .map(|(order, mut def)| {
                def.order = order;
                by_name.entry(def.name.to_lowercase()).or_insert(order);
                def
            })
            .collect();

        Self {
            name: name.into(),
            read_only,
            fields,
            by_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Case-insensitive field lookup.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&order| &self.fields[order])
    }

    pub fn field_at(&self, order: usize) -> Option<&FieldDef> {
        self.fields.get(order)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldDef::name)
    }
}
