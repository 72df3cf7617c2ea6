use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A scalar operand of a search condition.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    Str(String),
    Num(f64),
    Int(i64),
    Timestamp(DateTime<Utc>),
    Range(RangeValue),
}

/// Numeric bounds. Unset bounds are left off the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeValue {
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_bound")]
    pub gt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_bound")]
    pub gte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_bound")]
    pub lt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_bound")]
    pub lte: Option<f64>,
}

impl RangeValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gt(mut self, bound: f64) -> Self {
        self.gt = Some(bound);
        self
    }

    pub fn gte(mut self, bound: f64) -> Self {
        self.gte = Some(bound);
        self
    }

    pub fn lt(mut self, bound: f64) -> Self {
        self.lt = Some(bound);
        self
    }

    pub fn lte(mut self, bound: f64) -> Self {
        self.lte = Some(bound);
        self
    }
}

// Integral floats go out as integers so `3.0` reads `3` on the wire.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub(crate) fn serialize_number<S>(value: f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(S::Error::custom(format!("{} is not representable as a JSON number", value)));
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

fn serialize_bound<S>(bound: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match bound {
        Some(value) => serialize_number(*value, serializer),
        None => serializer.serialize_none(),
    }
}

impl Serialize for SearchValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SearchValue::Str(s) => serializer.serialize_str(s),
            SearchValue::Num(n) => serialize_number(*n, serializer),
            SearchValue::Int(i) => serializer.serialize_i64(*i),
            SearchValue::Timestamp(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            SearchValue::Range(r) => r.serialize(serializer),
        }
    }
}

// Timestamps have no marker of their own on the wire, so they come back as `Str`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Int(i64),
    Num(f64),
    Str(String),
    Range(RangeValue),
}

impl<'de> Deserialize<'de> for SearchValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match WireValue::deserialize(deserializer)? {
            WireValue::Int(i) => SearchValue::Int(i),
            WireValue::Num(n) => SearchValue::Num(n),
            WireValue::Str(s) => SearchValue::Str(s),
            WireValue::Range(r) => SearchValue::Range(r),
        })
    }
}

impl From<&str> for SearchValue {
    fn from(s: &str) -> Self {
        SearchValue::Str(s.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(s: String) -> Self {
        SearchValue::Str(s)
    }
}

impl From<f64> for SearchValue {
    fn from(n: f64) -> Self {
        SearchValue::Num(n)
    }
}

impl From<i64> for SearchValue {
    fn from(i: i64) -> Self {
        SearchValue::Int(i)
    }
}

impl From<i32> for SearchValue {
    fn from(i: i32) -> Self {
        SearchValue::Int(i64::from(i))
    }
}

impl From<DateTime<Utc>> for SearchValue {
    fn from(t: DateTime<Utc>) -> Self {
        SearchValue::Timestamp(t)
    }
}

impl From<RangeValue> for SearchValue {
    fn from(r: RangeValue) -> Self {
        SearchValue::Range(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[test]
    fn test_scalars_encode_without_wrapper() {
        assert_eq!(serde_json::to_value(SearchValue::from("abc")).unwrap(), json!("abc"));
        assert_eq!(serde_json::to_value(SearchValue::Int(-42)).unwrap(), json!(-42));
        assert_eq!(serde_json::to_value(SearchValue::Num(2.5)).unwrap(), json!(2.5));
        assert_eq!(serde_json::to_string(&SearchValue::Num(7.0)).unwrap(), "7");
    }

    #[test]
    fn test_zero_timestamp() {
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        let encoded = serde_json::to_string(&SearchValue::Timestamp(zero)).unwrap();
        assert_eq!(encoded, "\"0001-01-01T00:00:00Z\"");
    }

    #[test]
    fn test_range_omits_unset_bounds() {
        let range = RangeValue::new().gt(3.0).lt(5.0);
        let encoded = serde_json::to_string(&SearchValue::Range(range)).unwrap();
        assert_eq!(encoded, r#"{"gt":3,"lt":5}"#);

        let all = RangeValue::new().gt(1.0).gte(1.5).lt(9.0).lte(8.5);
        assert_eq!(
            serde_json::to_value(all).unwrap(),
            json!({"gt": 1, "gte": 1.5, "lt": 9, "lte": 8.5})
        );
        assert_eq!(serde_json::to_string(&RangeValue::new()).unwrap(), "{}");
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        assert!(serde_json::to_string(&SearchValue::Num(f64::NAN)).is_err());
        assert!(serde_json::to_string(&RangeValue::new().lt(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_decode_by_json_shape() {
        let values: Vec<SearchValue> =
            serde_json::from_value(json!([1, 1.5, "x", {"gte": 2}])).unwrap();
        assert_eq!(
            values,
            vec![
                SearchValue::Int(1),
                SearchValue::Num(1.5),
                SearchValue::from("x"),
                SearchValue::Range(RangeValue::new().gte(2.0)),
            ]
        );
        assert!(serde_json::from_value::<SearchValue>(Value::Bool(true)).is_err());
    }
}
