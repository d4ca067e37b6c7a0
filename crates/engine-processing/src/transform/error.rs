use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The output schema does not describe the configured output field as a
    /// (nullable) array of (nullable) records. This is a configuration error
    /// and is never retried.
    #[error("Output field '{field}' does not match the output schema: {reason}")]
    SchemaMismatch { field: String, reason: String },
}

impl TransformError {
    pub fn schema_mismatch(field: &str, reason: impl Into<String>) -> Self {
        TransformError::SchemaMismatch {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
