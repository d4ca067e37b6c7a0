pub mod error;
pub mod image_properties;
pub mod pipeline;
pub mod record;

pub use error::TransformError;
pub use image_properties::ImagePropertiesTransformer;
pub use pipeline::{AnnotationTransformer, ImageFeature};
