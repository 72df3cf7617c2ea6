use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::search_value::{RangeValue, SearchValue};

/// Field-level predicate. Encodes as `{"type", "value", "case_sensitive"?}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SearchCondition {
    #[serde(rename = "eq")]
    Equals {
        value: SearchValue,
        #[serde(default)]
        case_sensitive: bool,
    },
    #[serde(rename = "not")]
    NotEquals {
        value: SearchValue,
        #[serde(default)]
        case_sensitive: bool,
    },
    #[serde(rename = "in")]
    In {
        #[serde(rename = "value")]
        values: Vec<SearchValue>,
        #[serde(default)]
        case_sensitive: bool,
    },
    #[serde(rename = "not_in")]
    NotIn {
        #[serde(rename = "value")]
        values: Vec<SearchValue>,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// `value` usually holds a string with `*` markers; it is passed through unchecked.
    #[serde(rename = "wildcard")]
    Wildcard {
        value: SearchValue,
        #[serde(default)]
        case_sensitive: bool,
    },
    #[serde(rename = "range")]
    Range { value: RangeValue },
}

impl SearchCondition {
    pub fn equals(value: impl Into<SearchValue>) -> Self {
        SearchCondition::Equals { value: value.into(), case_sensitive: false }
    }

    pub fn not_equals(value: impl Into<SearchValue>) -> Self {
        SearchCondition::NotEquals { value: value.into(), case_sensitive: false }
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SearchValue>,
    {
        SearchCondition::In {
            values: values.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    pub fn none_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SearchValue>,
    {
        SearchCondition::NotIn {
            values: values.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    pub fn wildcard(value: impl Into<SearchValue>) -> Self {
        SearchCondition::Wildcard { value: value.into(), case_sensitive: false }
    }

    pub fn range(value: RangeValue) -> Self {
        SearchCondition::Range { value }
    }

    /// Turns on case-sensitive matching. Range conditions have no such flag and are returned as is.
    pub fn case_sensitive(mut self) -> Self {
        match &mut self {
            SearchCondition::Equals { case_sensitive, .. }
            | SearchCondition::NotEquals { case_sensitive, .. }
            | SearchCondition::In { case_sensitive, .. }
            | SearchCondition::NotIn { case_sensitive, .. }
            | SearchCondition::Wildcard { case_sensitive, .. } => *case_sensitive = true,
            SearchCondition::Range { .. } => {}
        }
        self
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            SearchCondition::Equals { .. } => "eq",
            SearchCondition::NotEquals { .. } => "not",
            SearchCondition::In { .. } => "in",
            SearchCondition::NotIn { .. } => "not_in",
            SearchCondition::Wildcard { .. } => "wildcard",
            SearchCondition::Range { .. } => "range",
        }
    }
}

impl Serialize for SearchCondition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_tag())?;
        let case_sensitive = match self {
            SearchCondition::Equals { value, case_sensitive }
            | SearchCondition::NotEquals { value, case_sensitive }
            | SearchCondition::Wildcard { value, case_sensitive } => {
                map.serialize_entry("value", value)?;
                *case_sensitive
            }
            SearchCondition::In { values, case_sensitive }
            | SearchCondition::NotIn { values, case_sensitive } => {
                // an empty list still goes out as `[]`
                map.serialize_entry("value", values)?;
                *case_sensitive
            }
            SearchCondition::Range { value } => {
                map.serialize_entry("value", value)?;
                false
            }
        };
        if case_sensitive {
            map.serialize_entry("case_sensitive", &true)?;
        }
        map.end()
    }
}
