//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::DemoConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
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
pub fn load_config(path: &Path) -> Result<DemoConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<DemoConfig, ConfigError> {
    let config: DemoConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration: defaults, then the optional file,
/// then environment overrides. Validation runs on the final result.
pub fn resolve_config(path: Option<&Path>) -> Result<DemoConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => DemoConfig::default(),
    };

    config.apply_env();
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [app]
            bind_address = "127.0.0.1:18080"
            context_path = ""

            [integration]
            bind_address = "127.0.0.1:18081"

            [integration.upstream]
            host = "127.0.0.1:18080"
            url_path = "/test"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.app.context_path, "");
        assert_eq!(config.integration.upstream.url(), "http://127.0.0.1:18080/test");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let err = parse_config(
            r#"
            [integration.upstream]
            url_path = "no-slash"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("no-slash"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[app\nbind_address = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/demoapp.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
