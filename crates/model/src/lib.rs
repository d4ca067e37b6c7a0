pub mod annotation;
pub mod core;
pub mod records;
