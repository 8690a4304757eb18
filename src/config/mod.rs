//! Configuration Module

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_config, load_config_from_string};
pub use types::{Config, DocumentsConfig, OutputConfig, OutputFormat};
pub use validation::validate_config;
