//! Browse service.
//!
//! # Data Flow
//! ```text
//! Selection (letter, route, sort, filters)
//!     → browse.rs (open handle, lookup, fetch, filter)
//!     → RenderState (tables, options, notices)
//! ```

pub mod browse;
pub mod state;

pub use browse::BrowseService;
pub use state::{Notice, NoticeLevel, RenderState, Selection};
