//! Bus Route Browser (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http ──▶ service ──▶ cache ──▶ db ──▶ SQLite
//!                             │  server    browse     catalog    queries      │
//!                             │              │                               │
//!     Client Response         │              ▼                               │
//!     ◀───────────────────────┼── JSON ◀── routes (sort, filter, view)       │
//!                             │                                              │
//!                             │  config · observability · lifecycle          │
//!                             └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use route_browser::config::{load_config, validation::validate_config, BrowserConfig};
use route_browser::config::ConfigError;
use route_browser::lifecycle::{spawn_server, Shutdown};
use route_browser::observability::logging;

#[derive(Parser)]
#[command(name = "route-browser")]
#[command(about = "Browse bus routes, prices and ratings over HTTP", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override database.path.
    #[arg(short, long)]
    database: Option<String>,
}

fn resolve_config(args: &Args) -> Result<BrowserConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => BrowserConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(database) = &args.database {
        config.database.path = database.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_tracing(&config.observability)?;

    tracing::info!("route-browser v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path,
        table = %config.database.table,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server = spawn_server(config, &shutdown).await?;
    server.handle.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
