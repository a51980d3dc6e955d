//! Data source error definitions.

use thiserror::Error;

/// Errors surfaced by the data source boundary.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be opened (missing file, permissions, driver).
    #[error("cannot open {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed to prepare or execute.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The route table lacks a column every query relies on.
    #[error("table {table} has no {column} column")]
    MissingColumn { table: String, column: &'static str },
}

impl DbError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DbError::Connect { .. } => "connect",
            DbError::Query(_) => "query",
            DbError::MissingColumn { .. } => "schema",
        }
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, DbError::Connect { .. })
    }
}

/// Result type for data source operations.
pub type DbResult<T> = Result<T, DbError>;
