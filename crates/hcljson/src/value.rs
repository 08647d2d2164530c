//! value representation
//!
//! The output model is plain JSON
//! - null
//! - boolean (true/false)
//! - integer (signed, i64)
//! - decimal (f64, also used for integers that do not fit into i64)
//! - string (utf-8)
//! - array ("list" of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Expressions that can not be reduced to one of these are carried as [Value::String] holding
//! their normalized source text.
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

/// Order-preserving JSON object
pub type Map = indexmap::IndexMap<String, Value>;

/// All possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Builds a numeric value from the representations a hcl number offers
    ///
    /// Integers are preferred. Everything else (floats, integers beyond i64) becomes a decimal.
    pub fn number(int: Option<i64>, float: Option<f64>) -> Self {
        match (int, float) {
            (Some(int), _) => Value::Integer(int),
            (None, Some(float)) => Value::Decimal(float),
            // hcl numbers are always representable as f64
            (None, None) => Value::Null,
        }
    }

    pub fn empty_object() -> Self {
        Value::Object(Map::new())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<hcl::Number> for Value {
    fn from(value: hcl::Number) -> Self {
        Value::number(value.as_i64(), value.as_f64())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<K: ToString, V: Into<Value>> From<hcl::value::Map<K, V>> for Value {
    fn from(value: hcl::value::Map<K, V>) -> Self {
        Value::Object(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl<K: ToString, V: Into<Value>> From<hcl::Object<K, V>> for Value {
    fn from(value: hcl::Object<K, V>) -> Self {
        Value::Object(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl From<hcl::Value> for Value {
    fn from(value: hcl::Value) -> Value {
        match value {
            hcl::Value::Null => Value::Null,
            hcl::Value::Bool(b) => b.into(),
            hcl::Value::Number(n) => n.into(),
            hcl::Value::String(s) => s.into(),
            hcl::Value::Array(a) => a.into(),
            hcl::Value::Object(o) => o.into(),
        }
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_as_json() {
        let mut inner = Map::new();
        inner.insert("z".into(), Value::Null);
        inner.insert("a".into(), Value::Decimal(0.5));

        let mut object = Map::new();
        object.insert("list".into(), vec![Value::Integer(-5), true.into()].into());
        object.insert("inner".into(), Value::Object(inner));
        object.insert("text".into(), "a\"b".into());

        assert_eq!(
            serde_json::to_string(&Value::Object(object)).unwrap(),
            r#"{"list":[-5,true],"inner":{"z":null,"a":0.5},"text":"a\"b"}"#
        );
    }

    #[test]
    fn from_hcl_value() {
        let value: Value = hcl::Value::from(vec![
            hcl::Value::Null,
            hcl::Value::from(1.5),
            hcl::Value::from(7i64),
        ])
        .into();

        assert_eq!(
            value,
            Value::Array(vec![Value::Null, Value::Decimal(1.5), Value::Integer(7)])
        );
    }
}
