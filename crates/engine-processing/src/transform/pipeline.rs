use super::{error::TransformError, image_properties::ImagePropertiesTransformer};
use model::{annotation::AnnotateImageResponse, core::schema::Schema, records::row::RowData};
use serde::Deserialize;
use std::{fmt, str::FromStr, sync::Arc};

/// Annotation feature whose results a transformer writes into records.
///
/// Deserializes through [`FromStr`], so `image_properties`,
/// `IMAGE_PROPERTIES` and `Image Properties` all name the same feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ImageFeature {
    ImageProperties,
}

impl TryFrom<String> for ImageFeature {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for ImageFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "image_properties" => Ok(ImageFeature::ImageProperties),
            _ => Err(format!("Unknown image feature: {s}")),
        }
    }
}

impl fmt::Display for ImageFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFeature::ImageProperties => write!(f, "Image Properties"),
        }
    }
}

/// Maps one annotation response onto an input record, selected by feature.
#[derive(Debug, Clone)]
pub enum AnnotationTransformer {
    ImageProperties(ImagePropertiesTransformer),
}

impl AnnotationTransformer {
    pub fn new(feature: ImageFeature, schema: Arc<Schema>, output_field: &str) -> Self {
        match feature {
            ImageFeature::ImageProperties => AnnotationTransformer::ImageProperties(
                ImagePropertiesTransformer::new(schema, output_field),
            ),
        }
    }

    pub fn feature(&self) -> ImageFeature {
        match self {
            AnnotationTransformer::ImageProperties(_) => ImageFeature::ImageProperties,
        }
    }

    pub fn transform(
        &self,
        input: &RowData,
        response: &AnnotateImageResponse,
    ) -> Result<RowData, TransformError> {
        match self {
            AnnotationTransformer::ImageProperties(t) => t.transform(input, response),
        }
    }
}
