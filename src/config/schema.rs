//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! killboard front end. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

use crate::uri::HostProvider;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct KillboardConfig {
    /// Listener configuration (bind address, timeouts).
    pub listener: ListenerConfig,

    /// Board URL settings.
    pub site: SiteConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Board URL settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public URL of the board (e.g., "https://kb.example.com").
    /// When unset, links are built from the request's own host.
    pub kb_host: Option<String>,

    /// Generate path-info links (`/index.php/kill_detail/45/`) instead of
    /// query-string links (`/?a=kill_detail&id=45`).
    pub path_info: bool,

    /// Front controller path; path-info starts after it.
    pub script_name: String,

    /// Board title shown in page headers.
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            kb_host: None,
            path_info: false,
            script_name: "/index.php".to_string(),
            title: "Killboard".to_string(),
        }
    }
}

impl HostProvider for SiteConfig {
    fn kb_host(&self) -> Option<String> {
        self.kb_host.clone().filter(|h| !h.is_empty())
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
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
