//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::BalancerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BalancerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: BalancerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: BalancerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.health.probe_path, "/actuator/health");
        assert_eq!(config.health.fast_interval_secs, 30);
        assert_eq!(config.health.slow_interval_secs, 300);
    }

    #[test]
    fn test_partial_override() {
        let config: BalancerConfig = toml::from_str(
            r#"
            [health]
            fast_interval_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.health.fast_interval_secs, 5);
        assert_eq!(config.health.slow_interval_secs, 300);
    }

    #[test]
    fn test_validation_failure_lists_every_error() {
        let path = std::env::temp_dir().join("dwrr-balancer-loader-test.toml");
        fs::write(
            &path,
            "[listener]\nbind_address = \"\"\n\n[health]\nfast_interval_secs = 0\n",
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                let rendered = ConfigError::Validation(errors).to_string();
                assert!(rendered.contains("bind_address"));
                assert!(rendered.contains("fast_interval_secs"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}
