//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration before anything is started
//! - Start background tasks (metrics exporter)
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: an invalid config or a bind error is fatal
//! - A metrics exporter failure is logged and the server starts without it
//! - The database is not touched at startup; an unreachable database is
//!   reported per request instead

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::validation::validate_config;
use crate::config::{BrowserConfig, ConfigError};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Error type for server startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// A server running on a background task.
pub struct RunningServer {
    pub local_addr: SocketAddr,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Validate `config`, bind `listener.bind_address` and serve until `shutdown`
/// triggers.
pub async fn spawn_server(
    config: BrowserConfig,
    shutdown: &Shutdown,
) -> Result<RunningServer, StartupError> {
    // The table name is interpolated into SQL; it must pass validation first.
    validate_config(&config).map_err(ConfigError::Validation)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    Ok(RunningServer { local_addr, handle })
}
