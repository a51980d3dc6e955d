//! Data source subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → connection.rs (read-only handle, scoped release)
//!     → queries.rs (route index, route data)
//!     → RouteRecord rows
//! ```

pub mod connection;
pub mod error;
pub mod queries;

pub use connection::{ConnectionProvider, RouteConnection, SourceId};
pub use error::{DbError, DbResult};
pub use queries::{fetch_route, list_routes_starting_with};

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    use uuid::Uuid;

    use crate::config::DatabaseConfig;

    /// (route name, bus type, star rating, price) as stored text.
    pub type SeedRow = (&'static str, &'static str, &'static str, &'static str);

    /// A database file under the temp dir, removed on drop.
    pub struct TempDatabase {
        path: PathBuf,
    }

    impl TempDatabase {
        pub fn new() -> Self {
            let path = std::env::temp_dir().join(format!("route-browser-{}.db", Uuid::new_v4()));
            Self { path }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn config(&self) -> DatabaseConfig {
            DatabaseConfig {
                path: self.path.display().to_string(),
                ..DatabaseConfig::default()
            }
        }
    }

    impl Drop for TempDatabase {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    pub fn seed_database(path: &Path, rows: &[SeedRow]) {
        let conn = rusqlite::Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE bus_routes (
                Route_Name TEXT,
                Bus_Name TEXT,
                Bus_Type TEXT,
                Star_Rating TEXT,
                Price TEXT,
                Seats_Available INTEGER
            );",
        )
        .unwrap();
        for (route, bus_type, rating, price) in rows {
            conn.execute(
                "INSERT INTO bus_routes VALUES (?1, ?2, ?3, ?4, ?5, 30)",
                rusqlite::params![route, format!("{route} Travels"), bus_type, rating, price],
            )
            .unwrap();
        }
    }
}
