//! Configuration Type Definitions
//!
//! Settings for a validation run. These types are deserialised from an
//! optional TOML file; anything the file leaves out falls back to the
//! defaults below, and command line flags override both.

use serde::Deserialize;

/// Report rendering format.
#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Banner plus itemised bullet list (default)
    #[default]
    Text,

    /// Pretty-printed JSON report for CI
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Where the two documents live.
///
/// Relative paths are resolved against the app directory.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentsConfig {
    /// Widget definitions, an object keyed by widget ID
    pub widgets: String,

    /// Dashboard apps, an array of app objects
    pub apps: String,

    /// Treat a missing apps document as an error instead of skipping it
    pub require_apps: bool,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            widgets: "widgets.json".to_string(),
            apps: "apps.json".to_string(),
            require_apps: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Root configuration.
///
/// # Example Structure
///
/// ```toml
/// [documents]
/// widgets = "widgets.json"
/// apps = "apps.json"
/// require_apps = false
///
/// [output]
/// format = "json"
/// ```
#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub documents: DocumentsConfig,
    pub output: OutputConfig,
}
