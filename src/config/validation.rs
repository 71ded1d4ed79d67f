//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the board URL and the front controller path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: KillboardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::KillboardConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid kb_host {value}: {reason}")]
    InvalidHost { value: String, reason: String },

    #[error("script_name must start with '/' and not end with one: {0}")]
    InvalidScriptName(String),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &KillboardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if let Some(host) = config.site.kb_host.as_deref().filter(|h| !h.is_empty()) {
        match Url::parse(host) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if url.query().is_some() || url.fragment().is_some() {
                    errors.push(ValidationError::InvalidHost {
                        value: host.to_string(),
                        reason: "must not carry a query or fragment".to_string(),
                    });
                }
            }
            Ok(url) => errors.push(ValidationError::InvalidHost {
                value: host.to_string(),
                reason: format!("unsupported scheme {}", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidHost {
                value: host.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    let script = &config.site.script_name;
    if !script.starts_with('/') || (script.len() > 1 && script.ends_with('/')) {
        errors.push(ValidationError::InvalidScriptName(script.clone()));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&KillboardConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = KillboardConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.listener.request_timeout_secs = 0;
        config.site.kb_host = Some("ftp://kb.example".into());
        config.site.script_name = "index.php".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::InvalidScriptName("index.php".into())));
    }

    #[test]
    fn test_host_must_be_absolute_url() {
        let mut config = KillboardConfig::default();
        config.site.kb_host = Some("kb.example.com".into());
        assert!(matches!(
            validate_config(&config).unwrap_err()[0],
            ValidationError::InvalidHost { .. }
        ));

        config.site.kb_host = Some("https://kb.example.com/board".into());
        assert!(validate_config(&config).is_ok());
    }
}
