//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, capacity > 0, address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

/// A single semantic violation found in a configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "cache.capacity").
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every semantic constraint, collecting all violations.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a valid socket address: {:?}", config.listener.bind_address),
        });
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError {
            field: "listener.backlog",
            message: "must be at least 1".to_string(),
        });
    }
    if config.listener.read_buffer_size == 0 {
        errors.push(ValidationError {
            field: "listener.read_buffer_size",
            message: "must be at least 1 byte".to_string(),
        });
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.connect_secs",
            message: "must be at least 1 second".to_string(),
        });
    }
    if config.timeouts.client_read_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.client_read_secs",
            message: "must be at least 1 second".to_string(),
        });
    }
    if config.cache.capacity == 0 {
        errors.push(ValidationError {
            field: "cache.capacity",
            message: "must hold at least 1 entry".to_string(),
        });
    }
    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError {
            field: "cache.ttl_secs",
            message: "must be at least 1 second".to_string(),
        });
    }
    if config.cache.sweep_interval_secs == 0 {
        errors.push(ValidationError {
            field: "cache.sweep_interval_secs",
            message: "must be at least 1 second".to_string(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a valid socket address: {:?}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
