//! Folio - personal-portfolio data service
//!
//! A single-document profile (bio, education, skills, projects, work
//! history) stored in MongoDB and served over a small JSON REST API.
//!
//! ## Services
//!
//! - **Profile**: singleton CRUD over the one profile document
//! - **Query engine**: skill-based project filtering, skill-frequency
//!   ranking, and free-text search over the in-memory profile snapshot
//! - **Limits**: fixed-window per-IP rate limiting for reads and writes

pub mod config;
pub mod db;
pub mod limits;
pub mod query;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{FolioError, Result};
