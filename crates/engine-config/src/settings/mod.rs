pub mod validated;

pub use validated::{TransformerSettings, TransformerSettingsBuilder};
