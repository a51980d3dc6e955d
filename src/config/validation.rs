//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject table names that are not plain SQL identifiers, since the table
//!   name is the one piece of query text that cannot be a bound parameter
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BrowserConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BrowserConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("database.path must not be empty")]
    EmptyDatabasePath,

    #[error("database.table is not a valid identifier: {0:?}")]
    InvalidTableName(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("display.default_letter must be a single character, got {0:?}")]
    InvalidDefaultLetter(String),
}

/// Check a loaded configuration, collecting every problem.
pub fn validate_config(config: &BrowserConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.database.path.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabasePath);
    }

    if !is_identifier(&config.database.table) {
        errors.push(ValidationError::InvalidTableName(config.database.table.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.display.default_letter.chars().count() != 1 {
        errors.push(ValidationError::InvalidDefaultLetter(
            config.display.default_letter.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BrowserConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = BrowserConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.database.table = "bus_routes; DROP TABLE bus_routes".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(matches!(errors[1], ValidationError::InvalidTableName(_)));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = BrowserConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_identifier() {
        assert!(is_identifier("bus_routes"));
        assert!(is_identifier("_t1"));
        assert!(!is_identifier("1table"));
        assert!(!is_identifier("bus-routes"));
        assert!(!is_identifier(""));
    }
}
