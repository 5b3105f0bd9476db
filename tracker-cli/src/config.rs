//! Configuration file loading

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use tracker_engine::TrackerConfig;

/// Load a tracker configuration from a TOML file
pub fn load_config(path: &Path) -> Result<TrackerConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?} (use --write-default-config to create one)"))?;

    let config: TrackerConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {path:?}"))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {path:?}"))?;

    Ok(config)
}

/// Write the engine's built-in default configuration to `path`
pub fn write_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&TrackerConfig::default())
        .context("Failed to serialize the default configuration")?;
    fs::write(path, content).with_context(|| format!("Failed to write config file: {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_toml_round_trip() {
        let dir = std::env::temp_dir().join("tracker-cli-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tracker.toml");

        write_default_config(&path).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config, TrackerConfig::default());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            total_hours_goal = 6

            [[activities]]
            name = "writing"
            priority = 1

            [[activities]]
            name = "review"
            priority = 2

            [[pairs]]
            left = "writing"
            right = "review"
            name = "deep-work"
        "#;

        let config: TrackerConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.activities.len(), 2);
        assert_eq!(config.pairs.len(), 1);
        assert_eq!(config.total_hours_goal, 6);
        assert_eq!(config.total_acc_hours_goal, 40); // default
    }

    #[test]
    fn test_missing_config_has_a_helpful_error() {
        let err = load_config(Path::new("no-such-tracker.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("write-default-config"));
    }
}
