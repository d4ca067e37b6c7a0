use engine_config::settings::TransformerSettings;
use model::{
    annotation::AnnotateImageResponse,
    core::value::{FieldValue, Value},
    records::row::RowData,
};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

pub const SETTINGS_SUBSET: &str = include_str!("../fixtures/settings_subset.json");
pub const SETTINGS_ALL_FIELDS: &str = include_str!("../fixtures/settings_all_fields.json");
pub const SETTINGS_WRONG_FIELD: &str = include_str!("../fixtures/settings_wrong_field.json");
pub const RESPONSE: &str = include_str!("../fixtures/response.json");

static INIT: Once = Once::new();

/// Installs a global fmt subscriber honouring `RUST_LOG`, once per process.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Parse settings, panicking on any error
pub fn load_settings(json: &str) -> TransformerSettings {
    TransformerSettings::from_json(json).expect("valid settings fixture")
}

pub fn load_response(json: &str) -> AnnotateImageResponse {
    AnnotateImageResponse::from_json(json).expect("valid response fixture")
}

pub fn input_record() -> RowData {
    RowData::new(
        "input",
        vec![
            FieldValue::new("path", Value::String("gs://bucket/beach.jpg".to_string())),
            FieldValue::new("size", Value::Int(52_311)),
        ],
    )
}

/// The color info records written under `field`, panicking if the field is
/// not an array of records.
pub fn color_records(row: &RowData, field: &str) -> Vec<RowData> {
    row.get_value(field)
        .as_array()
        .expect("array output field")
        .iter()
        .map(|v| v.as_record().expect("color info record").clone())
        .collect()
}
