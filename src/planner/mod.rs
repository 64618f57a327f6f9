//! Keyword expansion engine
//!
//! Turns seed keywords into a list of suggested phrases with traffic and
//! competition metrics.
//!
//! # Flow
//!
//! ```text
//! seeds, language, locations
//!         │
//!         ▼
//!   normalize locations ──► IdeasRequest ──► KeywordSource
//!                                                 │
//!                          ExpansionOutcome ◄─────┘
//! ```
//!
//! Source faults never escape [`KeywordPlanner::expand`]; they come back as
//! [`ExpansionOutcome::Failure`].
//!
//! # Usage
//!
//! ```
//! use wordstart::planner::KeywordPlanner;
//!
//! let planner = KeywordPlanner::mock();
//! let outcome = planner.expand(&["shoes".to_string()], "en", None);
//! assert_eq!(outcome.keywords().len(), 8);
//! ```

pub mod location;
pub mod source;
pub mod variants;

use std::sync::Arc;

use crate::config::UpstreamConfig;
use crate::error::Result;
use crate::models::{ExpansionFailure, ExpansionOutcome, ExpansionResult, KeywordMetrics};

pub use location::{canonical_location, normalize_locations, DEFAULT_LOCATION};
pub use source::{IdeasRequest, KeywordSource, MockKeywordSource};
pub use variants::{expand_seed, VariantTemplate, VARIANTS_PER_SEED, VARIANT_TEMPLATES};

/// Keyword expansion engine
#[derive(Clone)]
pub struct KeywordPlanner {
    source: Arc<dyn KeywordSource>,
    upstream: UpstreamConfig,
}

impl std::fmt::Debug for KeywordPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordPlanner")
            .field("base_url", &self.upstream.base_url)
            .field("customer_id", &self.upstream.customer_id)
            .finish_non_exhaustive()
    }
}

impl KeywordPlanner {
    /// Create a planner backed by the given source
    pub fn new(source: Arc<dyn KeywordSource>, upstream: UpstreamConfig) -> Self {
        Self { source, upstream }
    }

    /// Planner backed by a non-deterministic mock source
    pub fn mock() -> Self {
        Self::new(Arc::new(MockKeywordSource::new()), UpstreamConfig::default())
    }

    /// Planner backed by a seeded mock source
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            Arc::new(MockKeywordSource::with_seed(seed)),
            UpstreamConfig::default(),
        )
    }

    /// Upstream settings this planner was built with
    pub fn upstream(&self) -> &UpstreamConfig {
        &self.upstream
    }

    /// Expand seed keywords into suggestions
    ///
    /// `locations` of `None` selects [`DEFAULT_LOCATION`]. Callers are
    /// expected to reject an empty seed list before calling this.
    pub fn expand(
        &self,
        seeds: &[String],
        language: &str,
        locations: Option<&[String]>,
    ) -> ExpansionOutcome {
        let locations = normalize_locations(locations);
        let request = IdeasRequest::new(
            self.upstream.customer_id.as_deref().unwrap_or_default(),
            seeds,
            language,
            &locations,
        );

        tracing::debug!(
            seeds = seeds.len(),
            language = %request.language_constant,
            locations = ?request.geo_target_constants,
            "Requesting keyword ideas"
        );

        match self.source.keyword_ideas(&request) {
            Ok(keywords) => {
                tracing::debug!(keywords = keywords.len(), "Keyword ideas generated");
                ExpansionOutcome::Success(ExpansionResult::new(keywords))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Keyword idea generation failed");
                ExpansionOutcome::Failure(ExpansionFailure::new(e.to_string()))
            }
        }
    }

    /// Metrics for a single keyword, without variant expansion
    pub fn metrics_for_one(&self, keyword: &str) -> Result<KeywordMetrics> {
        self.source.keyword_metrics(keyword)
    }
}

impl Default for KeywordPlanner {
    fn default() -> Self {
        Self::mock()
    }
}
