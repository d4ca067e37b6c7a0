use model::core::schema::SchemaError;
use thiserror::Error;

/// Errors raised while loading transformer settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings document is not valid JSON, misses required keys or
    /// names an unknown feature.
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The output schema could not be parsed.
    #[error("Invalid output schema: {0}")]
    Schema(#[from] SchemaError),

    /// A required setting was not provided.
    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
}
