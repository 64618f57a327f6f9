//! wordstart - keyword suggestion service
//!
//! Expands seed search queries into keyword suggestions with mock traffic and
//! competition metrics, and re-serializes result sets to JSON, CSV or TXT.
//!
//! # Architecture
//!
//! - [`config`] - Configuration loaded from the environment or a TOML file
//! - [`models`] - Keyword records, result envelopes and request bodies
//! - [`planner`] - Keyword expansion engine and data sources
//! - [`export`] - Result formatter
//! - [`server`] - axum HTTP API
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```
//! use wordstart::export::{format_records, ExportFormat};
//! use wordstart::planner::KeywordPlanner;
//!
//! let planner = KeywordPlanner::seeded(42);
//! let outcome = planner.expand(&["shoes".to_string()], "en", None);
//! let csv = format_records(outcome.keywords(), ExportFormat::Csv).unwrap();
//! assert_eq!(csv.body.lines().count(), 9);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod planner;
pub mod server;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::export::{format_records, ExportFormat, ExportPayload};
    pub use crate::models::{
        Competition, ExpansionOutcome, ExpansionResult, KeywordMetrics, KeywordRecord,
    };
    pub use crate::planner::{KeywordPlanner, KeywordSource, MockKeywordSource};
    pub use crate::server::WordstartServer;
}

// Direct re-exports for convenience
pub use models::{Competition, ExpansionOutcome, KeywordRecord};
