use crate::error::ConfigError;
use engine_processing::transform::{AnnotationTransformer, ImageFeature};
use model::core::schema::Schema;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

/// Settings document as supplied by the pipeline.
///
/// `schema` is either an inline JSON schema or a string holding one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    feature: ImageFeature,
    output_field: String,
    schema: JsonValue,
}

/// Immutable, validated configuration of an annotation transformer.
///
/// Only the presence of each setting is checked here. Whether the schema
/// actually declares the output field as an array of records is left to the
/// transformer, which reports it on first use.
#[derive(Debug, Clone)]
pub struct TransformerSettings {
    /// Annotation feature the transformer maps
    feature: ImageFeature,
    /// Field of the output record that receives the annotations
    output_field: String,
    /// Schema of the output record
    schema: Arc<Schema>,
}

impl TransformerSettings {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = serde_json::from_str(input)?;

        let schema = match &raw.schema {
            JsonValue::String(s) => Schema::parse_json(s)?,
            other => Schema::from_json(other)?,
        };

        let settings = TransformerSettingsBuilder::new()
            .feature(raw.feature)
            .output_field(&raw.output_field)
            .schema(schema)
            .build()?;

        info!(
            "Loaded {} transformer settings for output field '{}'",
            settings.feature, settings.output_field
        );
        Ok(settings)
    }

    pub fn feature(&self) -> ImageFeature {
        self.feature
    }

    pub fn output_field(&self) -> &str {
        &self.output_field
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn build_transformer(&self) -> AnnotationTransformer {
        AnnotationTransformer::new(self.feature, Arc::clone(&self.schema), &self.output_field)
    }
}

#[derive(Debug, Default)]
pub struct TransformerSettingsBuilder {
    feature: Option<ImageFeature>,
    output_field: Option<String>,
    schema: Option<Schema>,
}

impl TransformerSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature(mut self, feature: ImageFeature) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn output_field(mut self, output_field: &str) -> Self {
        self.output_field = Some(output_field.trim().to_string());
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn build(self) -> Result<TransformerSettings, ConfigError> {
        let output_field = self
            .output_field
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingSetting("outputField"))?;

        Ok(TransformerSettings {
            feature: self.feature.ok_or(ConfigError::MissingSetting("feature"))?,
            output_field,
            schema: Arc::new(self.schema.ok_or(ConfigError::MissingSetting("schema"))?),
        })
    }
}
