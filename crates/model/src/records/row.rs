use crate::core::value::{FieldValue, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered set of named field values.
///
/// `entity` carries the name of the record schema the row conforms to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn builder(entity: &str) -> RecordBuilder {
        RecordBuilder::new(entity)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values.iter().find(|f| f.name == field)
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .map(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.field_values.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.field_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_values.is_empty()
    }
}

impl fmt::Display for RowData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .field_values
            .iter()
            .map(|fv| format!("{}: {}", fv.name, fv.value))
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{}{{{fields}}}", self.entity)
    }
}

/// Accumulates field values for a new [`RowData`].
///
/// Setting a name that is already present overwrites its value in place, so
/// field order follows first insertion.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    entity: String,
    field_values: Vec<FieldValue>,
}

impl RecordBuilder {
    pub fn new(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            field_values: Vec::new(),
        }
    }

    /// Starts from `field_values` as given, repeated names included.
    pub fn from_fields(entity: &str, field_values: Vec<FieldValue>) -> Self {
        Self {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.field_values.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.value = value,
            None => self.field_values.push(FieldValue::new(name, value)),
        }
        self
    }

    pub fn build(self) -> RowData {
        RowData {
            entity: self.entity,
            field_values: self.field_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_appends_in_order() {
        let row = RowData::builder("image")
            .set("uri", "gs://bucket/a.png")
            .set("size", 42i64)
            .build();

        assert_eq!(row.entity, "image");
        assert_eq!(row.field_names(), vec!["uri", "size"]);
        assert_eq!(row.get_value("size"), Value::Int(42));
    }

    #[test]
    fn test_builder_overwrites_existing_field() {
        let row = RowData::builder("image")
            .set("uri", "a")
            .set("colors", Value::Null)
            .set("uri", "b")
            .build();

        assert_eq!(row.len(), 2);
        assert_eq!(row.field_names(), vec!["uri", "colors"]);
        assert_eq!(row.get_value("uri"), Value::String("b".to_string()));
    }

    #[test]
    fn test_from_fields_keeps_repeated_names() {
        let fields = vec![
            FieldValue::new("tag", Value::Int(1)),
            FieldValue::new("tag", Value::Int(2)),
        ];
        let row = RecordBuilder::from_fields("image", fields.clone())
            .set("uri", "a")
            .build();

        assert_eq!(row.field_names(), vec!["tag", "tag", "uri"]);
        assert_eq!(row.field_values[..2], fields[..]);
    }

    #[test]
    fn test_missing_field_reads_as_null() {
        let row = RowData::new("image", vec![]);
        assert!(row.is_empty());
        assert!(row.get("uri").is_none());
        assert_eq!(row.get_value("uri"), Value::Null);
    }
}
