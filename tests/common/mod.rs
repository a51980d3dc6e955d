//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use route_browser::config::BrowserConfig;
use route_browser::lifecycle::{spawn_server, Shutdown};

/// (route name, bus type, star rating, price) as stored text.
pub type SeedRow = (&'static str, &'static str, &'static str, &'static str);

/// Routes used across the API tests.
pub const SCENARIO: &[SeedRow] = &[
    ("Alpha Express", "A/C Sleeper", "4", "INR 300"),
    ("Alpha Express", "Non A/C Seater", "4", "INR 150"),
    ("Amber Line", "A/C Seater", "3.5", "INR 500"),
    ("Beta Cargo", "Seater", "2", "INR 90"),
];

/// A SQLite file under the temp dir, removed on drop.
pub struct TestDatabase {
    path: PathBuf,
}

impl TestDatabase {
    pub fn seeded(rows: &[SeedRow]) -> Self {
        let path = std::env::temp_dir().join(format!("route-browser-it-{}.db", uuid::Uuid::new_v4()));
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE bus_routes (
                Route_Name TEXT,
                Bus_Name TEXT,
                Bus_Type TEXT,
                Departing_Time TEXT,
                Star_Rating TEXT,
                Price TEXT,
                Seats_Available INTEGER
            );",
        )
        .unwrap();
        for (route, bus_type, rating, price) in rows {
            conn.execute(
                "INSERT INTO bus_routes VALUES (?1, ?2, ?3, '21:30', ?4, ?5, 12)",
                rusqlite::params![route, format!("{route} Travels"), bus_type, rating, price],
            )
            .unwrap();
        }
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// A server on an ephemeral port, stopped on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start(database_path: &Path) -> Self {
        let mut config = BrowserConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.database.path = database_path.display().to_string();

        let shutdown = Shutdown::new();
        let running = spawn_server(config, &shutdown).await.unwrap();

        // Give the accept loop a moment to start.
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            addr: running.local_addr,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> reqwest::Url {
        reqwest::Url::parse(&format!("http://{}{}", self.addr, path)).unwrap()
    }

    /// `/api/routes/{route}` with the route name percent-encoded.
    pub fn route_url(&self, route: &str) -> reqwest::Url {
        let mut url = self.url("/api/routes");
        url.path_segments_mut().unwrap().push(route);
        url
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
