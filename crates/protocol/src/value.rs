//! The closed metadata value union and the host boundary marshaler.
//!
//! Values crossing the runtime boundary are dynamically typed on the host
//! side. [`MetadataValue`] is the closed union the bridge is willing to
//! carry for callers; [`BoundaryValue`] is the host container superset the
//! platform hands us. Marshaling between them is deterministic and
//! all-or-nothing: a single value the union cannot represent fails the
//! entire payload instead of being dropped or coerced.
//!
//! # Type Mapping
//!
//! | metadata  | boundary | notes                                   |
//! |-----------|----------|-----------------------------------------|
//! | `Null`    | `Null`   |                                         |
//! | `Bool`    | `Bool`   |                                         |
//! | `Int`     | `Int`    | `i64`; narrower integers widen          |
//! | `Float`   | `Double` | `f64`; `f32` widens, never truncates    |
//! | `String`  | `String` |                                         |
//! | `Map`     | `Map`    | string keys, recursively marshaled      |
//! | `List`    | `List`   | order preserved, recursively marshaled  |
//! | (none)    | `Bytes`  | decode fails with `UnsupportedType`     |

use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use std::collections::BTreeMap;
use thiserror::Error;

/// A metadata payload keyed by string, in the closed union.
pub type MetadataMap = BTreeMap<String, MetadataValue>;

/// A metadata payload keyed by string, in the host container representation.
pub type BoundaryMap = BTreeMap<String, BoundaryValue>;

/// Error raised when a value cannot cross the runtime boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
    /// The value's runtime type falls outside the closed metadata union.
    #[error("unsupported metadata value type: {0}")]
    UnsupportedType(String),
}

impl MarshalError {
    /// Shorthand used by the conversion routines below.
    fn unsupported(type_name: impl Into<String>) -> Self {
        MarshalError::UnsupportedType(type_name.into())
    }
}

/// The closed union of values the bridge carries for callers.
///
/// Anything the editing session wants to attach to a result, or a caller
/// wants to pass to a builder, must fit this shape. There is deliberately
/// no escape hatch for platform-specific payloads.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetadataValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(BTreeMap<String, MetadataValue>),
    List(Vec<MetadataValue>),
}

impl MetadataValue {
    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            MetadataValue::Null => "null",
            MetadataValue::Bool(_) => "bool",
            MetadataValue::Int(_) => "int",
            MetadataValue::Float(_) => "float",
            MetadataValue::String(_) => "string",
            MetadataValue::Map(_) => "map",
            MetadataValue::List(_) => "list",
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        MetadataValue::Int(i64::from(value))
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Int(i64::from(value))
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}

impl From<f32> for MetadataValue {
    /// Widens to `f64`; narrower floating types are never truncated.
    fn from(value: f32) -> Self {
        MetadataValue::Float(f64::from(value))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<Vec<MetadataValue>> for MetadataValue {
    fn from(value: Vec<MetadataValue>) -> Self {
        MetadataValue::List(value)
    }
}

impl From<BTreeMap<String, MetadataValue>> for MetadataValue {
    fn from(value: BTreeMap<String, MetadataValue>) -> Self {
        MetadataValue::Map(value)
    }
}

/// A value in the host boundary's container representation.
///
/// This is a superset of [`MetadataValue`]: platform containers can carry
/// opaque binary payloads ([`BoundaryValue::Bytes`]) that the closed
/// metadata union deliberately rejects.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BoundaryValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    Map(BTreeMap<String, BoundaryValue>),
    List(Vec<BoundaryValue>),
}

impl BoundaryValue {
    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            BoundaryValue::Null => "null",
            BoundaryValue::Bool(_) => "bool",
            BoundaryValue::Int(_) => "int",
            BoundaryValue::Double(_) => "double",
            BoundaryValue::String(_) => "string",
            BoundaryValue::Bytes(_) => "bytes",
            BoundaryValue::Map(_) => "map",
            BoundaryValue::List(_) => "list",
        }
    }

    /// Converts into JSON, for serde-based configuration decoding.
    ///
    /// Fails closed: `Bytes` and non-finite doubles have no JSON
    /// representation.
    pub fn to_json(&self) -> Result<JsonValue, MarshalError> {
        match self {
            BoundaryValue::Null => Ok(JsonValue::Null),
            BoundaryValue::Bool(b) => Ok(JsonValue::Bool(*b)),
            BoundaryValue::Int(i) => Ok(JsonValue::Number(Number::from(*i))),
            BoundaryValue::Double(d) => Number::from_f64(*d)
                .map(JsonValue::Number)
                .ok_or_else(|| MarshalError::unsupported("non-finite double")),
            BoundaryValue::String(s) => Ok(JsonValue::String(s.clone())),
            BoundaryValue::Bytes(_) => Err(MarshalError::unsupported("bytes")),
            BoundaryValue::Map(map) => {
                let mut out = JsonMap::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), value.to_json()?);
                }
                Ok(JsonValue::Object(out))
            }
            BoundaryValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.to_json()?);
                }
                Ok(JsonValue::Array(out))
            }
        }
    }

    /// Converts from JSON.
    ///
    /// Integer literals keep their wire typing (`Int`); everything else
    /// numeric becomes `Double`. Unsigned integers above `i64::MAX` are
    /// outside the closed union and fail rather than losing precision.
    pub fn from_json(value: &JsonValue) -> Result<Self, MarshalError> {
        match value {
            JsonValue::Null => Ok(BoundaryValue::Null),
            JsonValue::Bool(b) => Ok(BoundaryValue::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(BoundaryValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    if n.is_f64() {
                        Ok(BoundaryValue::Double(f))
                    } else {
                        Err(MarshalError::unsupported("unsigned integer out of range"))
                    }
                } else {
                    Err(MarshalError::unsupported("number out of range"))
                }
            }
            JsonValue::String(s) => Ok(BoundaryValue::String(s.clone())),
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(BoundaryValue::from_json(item)?);
                }
                Ok(BoundaryValue::List(out))
            }
            JsonValue::Object(map) => {
                let mut out = BTreeMap::new();
                for (key, item) in map {
                    out.insert(key.clone(), BoundaryValue::from_json(item)?);
                }
                Ok(BoundaryValue::Map(out))
            }
        }
    }
}

/// Encodes a metadata value into the host boundary representation.
///
/// Exhaustive over the closed union; the input type leaves no default
/// branch, so encoding is total.
pub fn encode(value: &MetadataValue) -> BoundaryValue {
    match value {
        MetadataValue::Null => BoundaryValue::Null,
        MetadataValue::Bool(b) => BoundaryValue::Bool(*b),
        MetadataValue::Int(i) => BoundaryValue::Int(*i),
        MetadataValue::Float(f) => BoundaryValue::Double(*f),
        MetadataValue::String(s) => BoundaryValue::String(s.clone()),
        MetadataValue::Map(map) => BoundaryValue::Map(encode_map(map)),
        MetadataValue::List(items) => BoundaryValue::List(items.iter().map(encode).collect()),
    }
}

/// Encodes a whole metadata map.
pub fn encode_map(map: &BTreeMap<String, MetadataValue>) -> BTreeMap<String, BoundaryValue> {
    map.iter()
        .map(|(key, value)| (key.clone(), encode(value)))
        .collect()
}

/// Decodes a host boundary value into the closed metadata union.
///
/// The structural inverse of [`encode`]. Values only the container side
/// can represent (opaque byte blobs) fail with
/// [`MarshalError::UnsupportedType`]; there is no fallback encoding.
pub fn decode(value: &BoundaryValue) -> Result<MetadataValue, MarshalError> {
    match value {
        BoundaryValue::Null => Ok(MetadataValue::Null),
        BoundaryValue::Bool(b) => Ok(MetadataValue::Bool(*b)),
        BoundaryValue::Int(i) => Ok(MetadataValue::Int(*i)),
        BoundaryValue::Double(d) => Ok(MetadataValue::Float(*d)),
        BoundaryValue::String(s) => Ok(MetadataValue::String(s.clone())),
        BoundaryValue::Bytes(_) => Err(MarshalError::unsupported(value.type_name())),
        BoundaryValue::Map(map) => decode_map(map).map(MetadataValue::Map),
        BoundaryValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(decode(item)?);
            }
            Ok(MetadataValue::List(out))
        }
    }
}

/// Decodes a whole metadata map, all-or-nothing.
///
/// One unsupported value anywhere in the tree fails the entire call;
/// partial structures are never exposed.
pub fn decode_map(
    map: &BTreeMap<String, BoundaryValue>,
) -> Result<BTreeMap<String, MetadataValue>, MarshalError> {
    let mut out = BTreeMap::new();
    for (key, value) in map {
        out.insert(key.clone(), decode(value)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn depth_four_value() -> MetadataValue {
        // map → list → map → list of scalars
        let leaf = MetadataValue::List(vec![
            MetadataValue::Null,
            MetadataValue::Bool(true),
            MetadataValue::Int(-42),
            MetadataValue::Float(2.5),
            MetadataValue::String("leaf".to_string()),
        ]);
        let inner: BTreeMap<String, MetadataValue> =
            [("leaf".to_string(), leaf), ("count".to_string(), MetadataValue::Int(3))]
                .into_iter()
                .collect();
        let middle = MetadataValue::List(vec![
            MetadataValue::Map(inner),
            MetadataValue::String("sibling".to_string()),
        ]);
        let mut root = BTreeMap::new();
        root.insert("items".to_string(), middle);
        root.insert("version".to_string(), MetadataValue::Float(1.0));
        MetadataValue::Map(root)
    }

    #[test]
    fn test_round_trip_depth_four() {
        let value = depth_four_value();
        assert_eq!(decode(&encode(&value)), Ok(value));
    }

    #[test]
    fn test_round_trip_scalars() {
        for value in [
            MetadataValue::Null,
            MetadataValue::Bool(false),
            MetadataValue::Int(i64::MAX),
            MetadataValue::Int(i64::MIN),
            MetadataValue::Float(-0.125),
            MetadataValue::String(String::new()),
            MetadataValue::Map(BTreeMap::new()),
            MetadataValue::List(Vec::new()),
        ] {
            assert_eq!(decode(&encode(&value)), Ok(value));
        }
    }

    #[test]
    fn test_int_and_float_keep_distinct_wire_typing() {
        assert_eq!(encode(&MetadataValue::Int(5)), BoundaryValue::Int(5));
        assert_eq!(encode(&MetadataValue::Float(5.0)), BoundaryValue::Double(5.0));
        assert_eq!(decode(&BoundaryValue::Int(5)), Ok(MetadataValue::Int(5)));
        assert_eq!(decode(&BoundaryValue::Double(5.0)), Ok(MetadataValue::Float(5.0)));
    }

    #[test]
    fn test_decode_bytes_fails() {
        let err = decode(&BoundaryValue::Bytes(vec![1, 2, 3])).unwrap_err();
        assert_eq!(err, MarshalError::UnsupportedType("bytes".to_string()));
    }

    #[test]
    fn test_decode_is_all_or_nothing() {
        // A blob buried three levels down fails the whole map.
        let mut inner = BTreeMap::new();
        inner.insert("blob".to_string(), BoundaryValue::Bytes(vec![0xff]));
        let mut map = BTreeMap::new();
        map.insert("ok".to_string(), BoundaryValue::Int(1));
        map.insert(
            "nested".to_string(),
            BoundaryValue::List(vec![BoundaryValue::Map(inner)]),
        );
        assert!(decode_map(&map).is_err());
    }

    #[test]
    fn test_f32_widens_to_float() {
        let value = MetadataValue::from(1.5f32);
        assert_eq!(value, MetadataValue::Float(1.5));
    }

    #[test]
    fn test_from_json_number_typing() {
        assert_eq!(
            BoundaryValue::from_json(&json!(7)),
            Ok(BoundaryValue::Int(7))
        );
        assert_eq!(
            BoundaryValue::from_json(&json!(7.0)),
            Ok(BoundaryValue::Double(7.0))
        );
        let too_big = json!(u64::MAX);
        assert!(BoundaryValue::from_json(&too_big).is_err());
    }

    #[test]
    fn test_to_json_rejects_bytes_and_non_finite() {
        assert!(BoundaryValue::Bytes(vec![]).to_json().is_err());
        assert!(BoundaryValue::Double(f64::NAN).to_json().is_err());
        assert!(BoundaryValue::Double(f64::INFINITY).to_json().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let json = json!({
            "license": "key",
            "nested": {"flags": [true, false], "ratio": 0.5},
            "count": 9
        });
        let boundary = BoundaryValue::from_json(&json).unwrap();
        assert_eq!(boundary.to_json().unwrap(), json);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(BoundaryValue::Bytes(vec![]).type_name(), "bytes");
        assert_eq!(MetadataValue::Float(0.0).type_name(), "float");
        assert_eq!(MetadataValue::Map(BTreeMap::new()).type_name(), "map");
    }
}
