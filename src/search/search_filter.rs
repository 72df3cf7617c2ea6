use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::search_condition::SearchCondition;
use crate::error::EncodingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterType {
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

/// Request body for the document search endpoint.
///
/// Zero-valued fields are left out of the encoded document entirely. `filter` is a
/// `BTreeMap` so field names always come out in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filter: BTreeMap<String, SearchCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<FilterType>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<BTreeMap<String, SortOrder>>,
    #[serde(default, skip_serializing_if = "is_nil_uuid")]
    pub schema_id: Option<Uuid>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

fn is_nil_uuid(id: &Option<Uuid>) -> bool {
    id.is_none_or(|id| id.is_nil())
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the condition for `field`, replacing any earlier one.
    pub fn condition(mut self, field: impl Into<String>, condition: SearchCondition) -> Self {
        self.filter.insert(field.into(), condition);
        self
    }

    pub fn filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = Some(filter_type);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Appends one sort key. Keys apply in the order they are added.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(BTreeMap::from([(field.into(), order)]));
        self
    }

    pub fn schema_id(mut self, schema_id: Uuid) -> Self {
        self.schema_id = Some(schema_id);
        self
    }

    /// Encodes the filter as a compact JSON request body.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn encode_pretty(&self) -> Result<String, EncodingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
