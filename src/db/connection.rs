//! Connection provider for the route database.
//!
//! # Responsibilities
//! - Open read-only handles onto the configured SQLite file
//! - Report open failures as `DbError::Connect`, never panic
//! - Release handles when the caller's scope ends
//!
//! # Design Decisions
//! - Every `open` yields an independent handle; nothing is pooled
//! - The file is never created; a missing database is a connect failure
//! - Handles carry the identity of their data source, which is what the
//!   memo caches key on, so separate handles share cached results

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rusqlite::{Connection, OpenFlags};

use crate::config::DatabaseConfig;
use crate::db::error::{DbError, DbResult};

/// Identity of a data source, shared by every handle opened on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(Arc<str>);

impl SourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opens handles from a fixed connection target.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    path: PathBuf,
    busy_timeout: Duration,
    table: Arc<str>,
    currency_prefix: Arc<str>,
    source_id: SourceId,
}

impl ConnectionProvider {
    /// Create a provider from configuration. Nothing is opened yet.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let path = PathBuf::from(&config.path);
        let source_id = SourceId(Arc::from(format!("sqlite:{}#{}", path.display(), config.table)));
        Self {
            path,
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            table: Arc::from(config.table.as_str()),
            currency_prefix: Arc::from(config.currency_prefix.as_str()),
            source_id,
        }
    }

    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// Open a new read-only handle.
    pub fn open(&self) -> DbResult<RouteConnection> {
        let connect_err = |source| DbError::Connect {
            path: self.path.display().to_string(),
            source,
        };

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(connect_err)?;
        conn.busy_timeout(self.busy_timeout).map_err(connect_err)?;
        conn.execute_batch("PRAGMA query_only=ON;").map_err(connect_err)?;

        tracing::debug!(source = %self.source_id, "Database handle opened");

        Ok(RouteConnection {
            conn,
            source_id: self.source_id.clone(),
            table: self.table.clone(),
            currency_prefix: self.currency_prefix.clone(),
            opened_at: Instant::now(),
        })
    }

    /// Run `f` with a fresh handle, releasing it afterwards whatever `f` returns.
    pub fn with_connection<T, E>(
        &self,
        f: impl FnOnce(&RouteConnection) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let conn = self.open()?;
        let result = f(&conn);
        drop(conn);
        result
    }
}

/// An open handle. Closed when dropped.
pub struct RouteConnection {
    conn: Connection,
    source_id: SourceId,
    table: Arc<str>,
    currency_prefix: Arc<str>,
    opened_at: Instant,
}

impl RouteConnection {
    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// Validated table identifier.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn currency_prefix(&self) -> &str {
        &self.currency_prefix
    }

    pub(crate) fn raw(&self) -> &Connection {
        &self.conn
    }
}

impl fmt::Debug for RouteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteConnection")
            .field("source_id", &self.source_id)
            .field("table", &self.table)
            .finish()
    }
}

impl Drop for RouteConnection {
    fn drop(&mut self) {
        tracing::debug!(
            source = %self.source_id,
            held_ms = self.opened_at.elapsed().as_millis() as u64,
            "Database handle released"
        );
    }
}
