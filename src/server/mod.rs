//! HTTP surface of the keyword service
//!
//! # Routes
//!
//! ```text
//! GET  /                     landing page
//! POST /api/keywords         expand seed keywords
//! GET  /api/keyword/{kw}     metrics for one keyword
//! POST /api/export           re-serialize records (json, csv, txt)
//! GET  /health               liveness check
//! ```
//!
//! Each route is also reachable under the configured prefix
//! (`/thamini/wordstart` by default).
//!
//! # Usage
//!
//! ```ignore
//! use wordstart::config::Config;
//! use wordstart::server::WordstartServer;
//!
//! let server = WordstartServer::new(Config::from_env()?)?;
//! server.start().await?;
//! ```

pub mod api;
pub mod server;

pub use api::{create_router, ApiError, ErrorResponse, HealthResponse, NO_QUERIES_MESSAGE};
pub use server::{AppState, ServerError, ServerInfo, WordstartServer};
