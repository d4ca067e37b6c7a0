use crate::records::row::RowData;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Record(RowData),
    Null,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::String(v) => v.parse::<f64>().ok(),
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Bytes(_) => None,
            Value::Array(_) => None,
            Value::Record(_) => None,
            Value::Null => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RowData> {
        match self {
            Value::Record(row) => Some(row),
            _ => None,
        }
    }
}

/// Widens losslessly: `0.8f32` becomes `0.800000011920929`, not `0.8`.
/// Compare against `Value::from(x_f32)` rather than an `f64` literal.
impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<RowData>> for Value {
    fn from(rows: Vec<RowData>) -> Self {
        Value::Array(rows.into_iter().map(Value::Record).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

impl FieldValue {
    pub fn new(name: &str, value: Value) -> Self {
        FieldValue {
            name: name.to_string(),
            value,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Bytes(v) => {
                let hex = v
                    .iter()
                    .fold(String::new(), |acc, byte: &u8| acc + &format!("{byte:02x}"));
                write!(f, "0x{hex}")
            }
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "[{joined}]")
            }
            Value::Record(row) => write!(f, "{row}"),
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_from_f32_widens_exactly() {
        let v = Value::from(0.8f32);
        assert_eq!(v, Value::Float(f64::from(0.8f32)));
        assert_eq!(v.as_f64(), Some(f64::from(0.8f32)));
    }

    #[test]
    fn test_rows_into_array_value() {
        let rows = vec![
            RowData::new("color", vec![FieldValue::new("red", Value::Float(1.0))]),
            RowData::new("color", vec![FieldValue::new("red", Value::Float(2.0))]),
        ];
        let value = Value::from(rows.clone());

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].as_record(), Some(&rows[1]));
    }

    #[test]
    fn test_display_nested() {
        let row = RowData::new("color", vec![FieldValue::new("red", Value::Int(10))]);
        let value = Value::Array(vec![Value::Record(row), Value::Null]);
        assert_eq!(value.to_string(), "[color{red: 10}, NULL]");
    }
}
