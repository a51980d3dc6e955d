//! Bus route browser library.
//!
//! Narrow routes by first letter, pick one, sort its buses by price and
//! filter them by star rating and bus type, over a read-only SQLite table.

// Core subsystems
pub mod config;
pub mod db;
pub mod routes;
pub mod cache;
pub mod service;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::BrowserConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::{BrowseService, RenderState, Selection};
