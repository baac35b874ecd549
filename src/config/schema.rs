//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both servers.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable naming the upstream `host:port` for the relay.
pub const ENV_APP_LINK_ALIAS: &str = "DEMOTEST_APP_LINK_ALIAS";

/// Environment variable naming the upstream path for the relay.
pub const ENV_APP_URLPATH: &str = "DEMOTEST_APP_URLPATH";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Device demo application server.
    pub app: AppConfig,

    /// Integration-test relay server.
    pub integration: IntegrationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl DemoConfig {
    /// Apply environment overrides on top of the file/default values.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Same as [`DemoConfig::apply_env`] with an injected lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.integration.upstream = self.integration.upstream.resolve_with(lookup);
    }
}

/// Device demo application server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Context path the servlet is deployed under ("" or "/" for root).
    pub context_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            context_path: "/demoapp".to_string(),
        }
    }
}

/// Integration-test relay server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Bind address (e.g., "0.0.0.0:8081").
    pub bind_address: String,

    /// Where the relay sends its test request.
    pub upstream: UpstreamTarget,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
            upstream: UpstreamTarget::default(),
        }
    }
}

/// Upstream the relay forwards to: `http://{host}{url_path}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamTarget {
    /// Upstream `host:port`.
    pub host: String,

    /// Upstream path, including the leading slash.
    pub url_path: String,
}

impl Default for UpstreamTarget {
    fn default() -> Self {
        Self {
            host: "app:8080".to_string(),
            url_path: "/demoapp/test".to_string(),
        }
    }
}

impl UpstreamTarget {
    /// Override fields from `DEMOTEST_APP_LINK_ALIAS` / `DEMOTEST_APP_URLPATH`
    /// when the lookup yields a value; unset variables keep the current value.
    pub fn resolve_with<F>(&self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup(ENV_APP_LINK_ALIAS).unwrap_or_else(|| self.host.clone()),
            url_path: lookup(ENV_APP_URLPATH).unwrap_or_else(|| self.url_path.clone()),
        }
    }

    /// Full target URL.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.host, self.url_path)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
