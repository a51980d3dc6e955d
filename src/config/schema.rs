//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the browser
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the route browser.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BrowserConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Data source settings.
    pub database: DatabaseConfig,

    /// Presentation formatting and defaults.
    pub display: DisplayConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Relational data source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Opened read-only, never created.
    pub path: String,

    /// Table holding one row per bus service.
    pub table: String,

    /// How long a handle waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Currency prefix stripped from price text before parsing (e.g. "INR").
    pub currency_prefix: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "redbus.db".to_string(),
            table: "bus_routes".to_string(),
            busy_timeout_ms: 5_000,
            currency_prefix: "INR".to_string(),
        }
    }
}

/// Presentation defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Symbol placed in front of formatted prices.
    pub currency_symbol: String,

    /// Starting letter used when a request does not supply one.
    pub default_letter: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            default_letter: "A".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
