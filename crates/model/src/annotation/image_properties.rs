use serde::{Deserialize, Serialize};

/// Response of an image annotation request, reduced to the parts the
/// transformers read. Every level is optional on the wire and reads as empty
/// when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotateImageResponse {
    pub image_properties_annotation: Option<ImagePropertiesAnnotation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePropertiesAnnotation {
    pub dominant_colors: Option<DominantColorsAnnotation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DominantColorsAnnotation {
    pub colors: Vec<ColorInfo>,
}

/// One dominant color along with how much of the image it covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorInfo {
    pub color: Color,
    /// Confidence in `[0, 1]`.
    pub score: f32,
    /// Fraction of pixels the color occupies, in `[0, 1]`.
    pub pixel_fraction: f32,
}

/// RGBA color with channel values as reported by the annotation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

impl AnnotateImageResponse {
    pub fn with_dominant_colors(colors: Vec<ColorInfo>) -> Self {
        Self {
            image_properties_annotation: Some(ImagePropertiesAnnotation {
                dominant_colors: Some(DominantColorsAnnotation { colors }),
            }),
        }
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn dominant_colors(&self) -> &[ColorInfo] {
        self.image_properties_annotation
            .as_ref()
            .and_then(|props| props.dominant_colors.as_ref())
            .map(|dominant| dominant.colors.as_slice())
            .unwrap_or_default()
    }
}

impl ColorInfo {
    pub fn new(color: Color, score: f32, pixel_fraction: f32) -> Self {
        Self {
            color,
            score,
            pixel_fraction,
        }
    }
}

impl Color {
    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            alpha: Some(alpha),
            ..Self::rgb(red, green, blue)
        }
    }

    /// Opacity of the color. An unset alpha reads as `0.0`, the default of
    /// the wrapper value it travels in.
    pub fn alpha_value(&self) -> f32 {
        self.alpha.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_response() {
        let json = r#"{
            "imagePropertiesAnnotation": {
                "dominantColors": {
                    "colors": [
                        {
                            "color": { "red": 10, "green": 20, "blue": 30, "alpha": 0.5 },
                            "score": 0.8,
                            "pixelFraction": 0.3
                        },
                        { "color": { "red": 255 }, "score": 0.1 }
                    ]
                }
            }
        }"#;

        let response = AnnotateImageResponse::from_json(json).unwrap();
        let colors = response.dominant_colors();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0], ColorInfo::new(Color::rgba(10.0, 20.0, 30.0, 0.5), 0.8, 0.3));
        assert_eq!(colors[1].color, Color::rgb(255.0, 0.0, 0.0));
        assert_eq!(colors[1].pixel_fraction, 0.0);
    }

    #[test]
    fn test_missing_annotation_levels_read_as_empty() {
        assert!(AnnotateImageResponse::default().dominant_colors().is_empty());

        let response = AnnotateImageResponse::from_json(r#"{"imagePropertiesAnnotation": {}}"#)
            .unwrap();
        assert!(response.dominant_colors().is_empty());
    }

    #[test]
    fn test_unset_alpha_defaults_to_zero() {
        assert_eq!(Color::rgb(1.0, 2.0, 3.0).alpha_value(), 0.0);
        assert_eq!(Color::rgba(1.0, 2.0, 3.0, 0.25).alpha_value(), 0.25);
    }
}
