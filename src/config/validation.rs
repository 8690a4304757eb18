use super::types::Config;

pub fn validate_config(config: &Config) -> Result<(), String> {
    if config.documents.widgets.trim().is_empty() {
        return Err("documents.widgets must name a file".into());
    }

    if config.documents.apps.trim().is_empty() {
        return Err("documents.apps must name a file".into());
    }

    if config.documents.widgets == config.documents.apps {
        return Err(format!(
            "documents.widgets and documents.apps both point at '{}'",
            config.documents.widgets
        ));
    }

    Ok(())
}
