use vendor_risk_core::config::GradingConfig;

use super::file::read_file;

/// Load a grading config from a JSON or YAML file, or use the defaults.
pub fn read_config(path: Option<&str>) -> Result<GradingConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(GradingConfig::default());
    };

    let (canonical, contents) = read_file(path)?;

    let is_yaml = matches!(
        canonical.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let config: GradingConfig = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };

    config.validate()?;
    tracing::debug!(path = %canonical.display(), "loaded grading config");
    Ok(config)
}
