use super::{error::TransformError, record::output_record_builder};
use model::{
    annotation::{AnnotateImageResponse, ColorInfo},
    core::{
        schema::{RecordSchema, Schema},
        value::Value,
    },
    records::row::{RecordBuilder, RowData},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Field names a color info record may declare.
pub mod fields {
    pub const SCORE: &str = "score";
    pub const PIXEL_FRACTION: &str = "pixelFraction";
    pub const RED: &str = "red";
    pub const GREEN: &str = "green";
    pub const BLUE: &str = "blue";
    pub const ALPHA: &str = "alpha";
}

type Extractor = fn(&ColorInfo) -> Value;

/// Every field a color info record can carry, in output order. A field is
/// only written when the destination record schema declares it.
const COLOR_INFO_FIELDS: &[(&str, Extractor)] = &[
    (fields::SCORE, score),
    (fields::PIXEL_FRACTION, pixel_fraction),
    (fields::RED, red),
    (fields::GREEN, green),
    (fields::BLUE, blue),
    (fields::ALPHA, alpha),
];

fn score(info: &ColorInfo) -> Value {
    info.score.into()
}

fn pixel_fraction(info: &ColorInfo) -> Value {
    info.pixel_fraction.into()
}

fn red(info: &ColorInfo) -> Value {
    info.color.red.into()
}

fn green(info: &ColorInfo) -> Value {
    info.color.green.into()
}

fn blue(info: &ColorInfo) -> Value {
    info.color.blue.into()
}

fn alpha(info: &ColorInfo) -> Value {
    info.color.alpha_value().into()
}

/// Writes the dominant colors of an image properties annotation into the
/// configured output field as an array of color info records.
///
/// The output schema decides which color attributes are kept: the output
/// field must be a (nullable) array of (nullable) records, and only the
/// fields that record declares are populated. A schema that does not have
/// this shape is reported on the first `transform` call.
#[derive(Debug, Clone)]
pub struct ImagePropertiesTransformer {
    schema: Arc<Schema>,
    output_field: String,
}

impl ImagePropertiesTransformer {
    pub fn new(schema: Arc<Schema>, output_field: impl Into<String>) -> Self {
        Self {
            schema,
            output_field: output_field.into(),
        }
    }

    pub fn transform(
        &self,
        input: &RowData,
        response: &AnnotateImageResponse,
    ) -> Result<RowData, TransformError> {
        let color_schema = self.color_info_schema().inspect_err(|e| {
            warn!("Cannot map dominant colors: {e}");
        })?;

        let colors = response
            .dominant_colors()
            .iter()
            .map(|info| extract_color_info(color_schema, info))
            .collect::<Vec<RowData>>();

        debug!(
            output_field = %self.output_field,
            colors = colors.len(),
            fields = color_schema.fields.len(),
            "Mapped dominant colors"
        );

        Ok(output_record_builder(input, &self.schema)
            .set(&self.output_field, colors)
            .build())
    }

    /// Resolves the record schema of one element of the output field, with
    /// nullability stripped from both the array and its items.
    pub fn color_info_schema(&self) -> Result<&RecordSchema, TransformError> {
        let field = &self.output_field;

        let output = self.schema.non_nullable().as_record().ok_or_else(|| {
            TransformError::schema_mismatch(
                field,
                format!(
                    "output schema must be a record, found '{}'",
                    self.schema.non_nullable().type_name()
                ),
            )
        })?;

        let field_schema = output
            .field(field)
            .ok_or_else(|| {
                TransformError::schema_mismatch(
                    field,
                    format!("field is not declared in record '{}'", output.name),
                )
            })?
            .schema
            .non_nullable();

        let items = field_schema.component_schema().ok_or_else(|| {
            TransformError::schema_mismatch(
                field,
                format!("expected an array, found '{}'", field_schema.type_name()),
            )
        })?;

        items.non_nullable().as_record().ok_or_else(|| {
            TransformError::schema_mismatch(
                field,
                format!(
                    "array items must be records, found '{}'",
                    items.non_nullable().type_name()
                ),
            )
        })
    }
}

fn extract_color_info(schema: &RecordSchema, info: &ColorInfo) -> RowData {
    COLOR_INFO_FIELDS
        .iter()
        .filter(|(name, _)| schema.has_field(name))
        .fold(RecordBuilder::new(&schema.name), |builder, (name, extract)| {
            builder.set(name, extract(info))
        })
        .build()
}
