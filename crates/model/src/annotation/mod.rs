pub mod image_properties;

pub use image_properties::{
    AnnotateImageResponse, Color, ColorInfo, DominantColorsAnnotation, ImagePropertiesAnnotation,
};
