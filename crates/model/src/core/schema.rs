use serde_json::{Map, Value as JsonValue, json};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Invalid schema JSON: {0}")]
    Json(String),

    #[error("Unsupported schema type: {0}")]
    UnsupportedType(String),

    #[error("Invalid {kind} schema: {message}")]
    Invalid { kind: &'static str, message: String },
}

/// Declarative description of a value's shape.
///
/// Nullability is a wrapper around another schema rather than a flag, so a
/// nullable array of nullable records is
/// `Nullable(Array(Nullable(Record(..))))`.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Bytes,
    Array(Box<Schema>),
    Record(RecordSchema),
    Nullable(Box<Schema>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub schema: Schema,
}

impl SchemaField {
    pub fn new(name: &str, schema: Schema) -> Self {
        Self {
            name: name.to_string(),
            schema,
        }
    }
}

impl RecordSchema {
    pub fn new(name: &str, fields: Vec<SchemaField>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

impl Schema {
    pub fn nullable(schema: Schema) -> Self {
        Schema::Nullable(Box::new(schema))
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn record(name: &str, fields: Vec<SchemaField>) -> Self {
        Schema::Record(RecordSchema::new(name, fields))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Schema::Nullable(_))
    }

    /// Strips every nullability layer around this schema.
    pub fn non_nullable(&self) -> &Schema {
        match self {
            Schema::Nullable(inner) => inner.non_nullable(),
            other => other,
        }
    }

    /// Item schema of an array, `None` for anything else.
    pub fn component_schema(&self) -> Option<&Schema> {
        match self {
            Schema::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            Schema::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Null => "null",
            Schema::Boolean => "boolean",
            Schema::Int => "int",
            Schema::Long => "long",
            Schema::Float => "float",
            Schema::Double => "double",
            Schema::String => "string",
            Schema::Bytes => "bytes",
            Schema::Array(_) => "array",
            Schema::Record(_) => "record",
            Schema::Nullable(_) => "union",
        }
    }

    pub fn parse_json(input: &str) -> Result<Self, SchemaError> {
        let json: JsonValue =
            serde_json::from_str(input).map_err(|e| SchemaError::Json(e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &JsonValue) -> Result<Self, SchemaError> {
        match json {
            JsonValue::String(name) => Self::primitive(name),
            JsonValue::Array(members) => Self::union_from_json(members),
            JsonValue::Object(obj) => Self::complex_from_json(obj),
            other => Err(SchemaError::UnsupportedType(other.to_string())),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Schema::Array(items) => json!({ "type": "array", "items": items.to_json() }),
            Schema::Record(record) => {
                let fields = record
                    .fields
                    .iter()
                    .map(|f| json!({ "name": f.name, "type": f.schema.to_json() }))
                    .collect::<Vec<_>>();
                json!({ "type": "record", "name": record.name, "fields": fields })
            }
            Schema::Nullable(inner) => json!([inner.to_json(), "null"]),
            primitive => JsonValue::String(primitive.type_name().to_string()),
        }
    }

    fn primitive(name: &str) -> Result<Self, SchemaError> {
        match name {
            "null" => Ok(Schema::Null),
            "boolean" => Ok(Schema::Boolean),
            "int" => Ok(Schema::Int),
            "long" => Ok(Schema::Long),
            "float" => Ok(Schema::Float),
            "double" => Ok(Schema::Double),
            "string" => Ok(Schema::String),
            "bytes" => Ok(Schema::Bytes),
            other => Err(SchemaError::UnsupportedType(other.to_string())),
        }
    }

    // Only `[T, "null"]` style unions are representable.
    fn union_from_json(members: &[JsonValue]) -> Result<Self, SchemaError> {
        let has_null = members.iter().any(|m| m.as_str() == Some("null"));
        let mut others = members
            .iter()
            .filter(|m| m.as_str() != Some("null"))
            .map(Self::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        match (others.len(), has_null) {
            (1, true) => Ok(Schema::nullable(others.remove(0))),
            (1, false) => Ok(others.remove(0)),
            (0, true) => Ok(Schema::Null),
            _ => Err(SchemaError::Invalid {
                kind: "union",
                message: format!("only nullable unions are supported, got {members:?}"),
            }),
        }
    }

    fn complex_from_json(obj: &Map<String, JsonValue>) -> Result<Self, SchemaError> {
        let type_json = obj.get("type").ok_or_else(|| SchemaError::Invalid {
            kind: "complex",
            message: "missing 'type'".to_string(),
        })?;

        match type_json.as_str() {
            Some("record") => {
                let name = obj
                    .get("name")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| SchemaError::Invalid {
                        kind: "record",
                        message: "missing 'name'".to_string(),
                    })?;
                let fields = obj
                    .get("fields")
                    .and_then(JsonValue::as_array)
                    .ok_or_else(|| SchemaError::Invalid {
                        kind: "record",
                        message: format!("record '{name}' has no 'fields' array"),
                    })?
                    .iter()
                    .map(Self::field_from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Schema::record(name, fields))
            }
            Some("array") => {
                let items = obj.get("items").ok_or_else(|| SchemaError::Invalid {
                    kind: "array",
                    message: "missing 'items'".to_string(),
                })?;
                Ok(Schema::array(Self::from_json(items)?))
            }
            // {"type": "float"}, {"type": ["float", "null"]} and friends
            _ => Self::from_json(type_json),
        }
    }

    fn field_from_json(json: &JsonValue) -> Result<SchemaField, SchemaError> {
        let name = json
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| SchemaError::Invalid {
                kind: "field",
                message: format!("field without a name: {json}"),
            })?;
        let schema_json = json.get("type").ok_or_else(|| SchemaError::Invalid {
            kind: "field",
            message: format!("field '{name}' has no 'type'"),
        })?;
        Ok(SchemaField::new(name, Self::from_json(schema_json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS_SCHEMA: &str = r#"{
        "type": "record",
        "name": "output",
        "fields": [
            { "name": "path", "type": "string" },
            { "name": "colors", "type": [
                { "type": "array", "items": [
                    { "type": "record", "name": "colorInfo", "fields": [
                        { "name": "score", "type": "float" },
                        { "name": "alpha", "type": ["float", "null"] }
                    ]},
                    "null"
                ]},
                "null"
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_nested_nullable_schema() {
        let schema = Schema::parse_json(COLORS_SCHEMA).unwrap();
        let record = schema.as_record().unwrap();
        assert_eq!(record.name, "output");
        assert_eq!(record.field_names(), vec!["path", "colors"]);

        let colors = &record.field("colors").unwrap().schema;
        assert!(colors.is_nullable());

        let items = colors.non_nullable().component_schema().unwrap();
        assert!(items.is_nullable());

        let color_info = items.non_nullable().as_record().unwrap();
        assert_eq!(color_info.name, "colorInfo");
        assert!(color_info.has_field("score"));
        assert_eq!(
            color_info.field("alpha").unwrap().schema,
            Schema::nullable(Schema::Float)
        );
    }

    #[test]
    fn test_non_nullable_strips_every_layer() {
        let schema = Schema::nullable(Schema::nullable(Schema::Double));
        assert_eq!(schema.non_nullable(), &Schema::Double);
        assert_eq!(Schema::Double.non_nullable(), &Schema::Double);
    }

    #[test]
    fn test_component_schema_only_for_arrays() {
        assert_eq!(
            Schema::array(Schema::Int).component_schema(),
            Some(&Schema::Int)
        );
        assert_eq!(Schema::Int.component_schema(), None);
        assert_eq!(Schema::nullable(Schema::array(Schema::Int)).component_schema(), None);
    }

    #[test]
    fn test_to_json_parses_back() {
        let schema = Schema::parse_json(COLORS_SCHEMA).unwrap();
        let reparsed = Schema::from_json(&schema.to_json()).unwrap();
        assert_eq!(schema, reparsed);
    }

    #[test]
    fn test_rejects_general_union() {
        let err = Schema::parse_json(r#"["int", "string"]"#).unwrap_err();
        assert!(matches!(err, SchemaError::Invalid { kind: "union", .. }));
    }

    #[test]
    fn test_rejects_unknown_type_and_bad_json() {
        assert_eq!(
            Schema::parse_json(r#""decimal""#),
            Err(SchemaError::UnsupportedType("decimal".to_string()))
        );
        assert!(matches!(
            Schema::parse_json("{not json"),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn test_record_requires_fields() {
        let err = Schema::parse_json(r#"{"type": "record", "name": "r"}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Invalid { kind: "record", .. }));
    }
}
