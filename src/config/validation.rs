//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Bind addresses must be socket addresses
//! - Context and upstream paths must be well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DemoConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::DemoConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid bind address '{value}'")]
    BindAddress { field: &'static str, value: String },

    #[error("app.context_path '{0}' must be empty or start with '/' and not end with '/'")]
    ContextPath(String),

    #[error("integration.upstream.host must not be empty")]
    EmptyUpstreamHost,

    #[error("integration.upstream.url_path '{0}' must start with '/'")]
    UpstreamPath(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &DemoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("app.bind_address", &config.app.bind_address),
        ("integration.bind_address", &config.integration.bind_address),
    ] {
        if value.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::BindAddress {
                field,
                value: value.clone(),
            });
        }
    }

    if !is_valid_context_path(&config.app.context_path) {
        errors.push(ValidationError::ContextPath(config.app.context_path.clone()));
    }

    let upstream = &config.integration.upstream;
    if upstream.host.trim().is_empty() {
        errors.push(ValidationError::EmptyUpstreamHost);
    }
    if !upstream.url_path.starts_with('/') {
        errors.push(ValidationError::UpstreamPath(upstream.url_path.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_context_path(path: &str) -> bool {
    path.is_empty() || path == "/" || (path.starts_with('/') && !path.ends_with('/'))
}
