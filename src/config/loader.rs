use super::types::Config;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    load_config_from_string(&content)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Load configuration from a string
pub fn load_config_from_string(content: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}
