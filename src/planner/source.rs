//! Keyword data sources
//!
//! [`KeywordSource`] is the boundary between the planner and whatever
//! provides keyword data. The only implementation today is
//! [`MockKeywordSource`], which synthesizes metrics locally.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::models::{Competition, KeywordMetrics, KeywordRecord};

use super::variants::{expand_seed, VARIANTS_PER_SEED};

/// Range of synthetic monthly search volumes
pub const MONTHLY_SEARCHES_RANGE: RangeInclusive<u32> = 100..=100_000;
/// Range of synthetic competition indices
pub const COMPETITION_INDEX_RANGE: RangeInclusive<u8> = 0..=100;
/// Range of synthetic low top-of-page bids
pub const LOW_BID_RANGE: RangeInclusive<u32> = 10..=500;
/// Range of synthetic high top-of-page bids
pub const HIGH_BID_RANGE: RangeInclusive<u32> = 500..=2000;
/// Range of synthetic relevance scores
pub const RELEVANCE_RANGE: RangeInclusive<u8> = 70..=100;

// ============================================================================
// Upstream Request
// ============================================================================

/// Keyword ideas request in the shape the upstream planner API expects
#[derive(Debug, Clone, Serialize)]
pub struct IdeasRequest {
    pub customer_id: String,
    pub keyword_seed: KeywordSeed,
    pub language_constant: String,
    #[serde(rename = "geoTargetConstants")]
    pub geo_target_constants: Vec<String>,
    pub include_adult_keywords: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordSeed {
    pub keywords: Vec<String>,
}

impl IdeasRequest {
    pub fn new(customer_id: &str, seeds: &[String], language: &str, locations: &[String]) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            keyword_seed: KeywordSeed {
                keywords: seeds.to_vec(),
            },
            language_constant: format!("languageConstants/{language}"),
            geo_target_constants: locations
                .iter()
                .map(|code| format!("geoTargetConstants/{code}"))
                .collect(),
            include_adult_keywords: false,
        }
    }

    /// Seed keywords carried by the request
    pub fn seeds(&self) -> &[String] {
        &self.keyword_seed.keywords
    }
}

// ============================================================================
// Source Trait
// ============================================================================

/// Provider of keyword ideas and per-keyword metrics
///
/// Implementations must be safe to call from concurrent request handlers.
pub trait KeywordSource: Send + Sync {
    /// Suggestions for every seed in the request, seed-major
    fn keyword_ideas(&self, request: &IdeasRequest) -> Result<Vec<KeywordRecord>>;

    /// Metrics for one keyword
    fn keyword_metrics(&self, keyword: &str) -> Result<KeywordMetrics>;
}

// ============================================================================
// Mock Source
// ============================================================================

/// Source that derives variants from templates and draws random metrics
#[derive(Debug, Clone, Default)]
pub struct MockKeywordSource {
    seed: Option<u64>,
}

impl MockKeywordSource {
    /// Non-deterministic source; every call draws from fresh entropy
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Deterministic source; every call replays the same sequence
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    fn random_record<R: Rng>(rng: &mut R, keyword: String) -> KeywordRecord {
        KeywordRecord {
            keyword,
            avg_monthly_searches: rng.gen_range(MONTHLY_SEARCHES_RANGE),
            competition: Competition::ALL[rng.gen_range(0..Competition::ALL.len())],
            competition_index: rng.gen_range(COMPETITION_INDEX_RANGE),
            low_top_of_page_bid: rng.gen_range(LOW_BID_RANGE),
            high_top_of_page_bid: rng.gen_range(HIGH_BID_RANGE),
            relevance: rng.gen_range(RELEVANCE_RANGE),
        }
    }
}

impl KeywordSource for MockKeywordSource {
    fn keyword_ideas(&self, request: &IdeasRequest) -> Result<Vec<KeywordRecord>> {
        let seeds = request.seeds();
        if seeds.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::internal("seed keyword must not be empty"));
        }

        let mut rng = self.rng();
        let mut records = Vec::with_capacity(seeds.len() * VARIANTS_PER_SEED);

        for seed in seeds {
            for phrase in expand_seed(seed) {
                records.push(Self::random_record(&mut rng, phrase));
            }
        }

        Ok(records)
    }

    fn keyword_metrics(&self, keyword: &str) -> Result<KeywordMetrics> {
        Ok(KeywordMetrics {
            keyword: keyword.to_string(),
            avg_monthly_searches: 1000,
            competition: Competition::Medium,
            competition_index: 50,
            low_top_of_page_bid: 50,
            high_top_of_page_bid: 200,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(seeds: &[&str]) -> IdeasRequest {
        let seeds: Vec<String> = seeds.iter().map(|s| s.to_string()).collect();
        IdeasRequest::new("", &seeds, "ru", &["2840".to_string()])
    }

    #[test]
    fn test_ideas_request_payload() {
        let req = IdeasRequest::new(
            "123",
            &["shoes".to_string()],
            "en",
            &["2250".to_string(), "2826".to_string()],
        );
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(value["customer_id"], "123");
        assert_eq!(value["keyword_seed"]["keywords"][0], "shoes");
        assert_eq!(value["language_constant"], "languageConstants/en");
        assert_eq!(value["geoTargetConstants"][1], "geoTargetConstants/2826");
        assert_eq!(value["include_adult_keywords"], false);
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let source = MockKeywordSource::with_seed(42);
        let first = source.keyword_ideas(&request(&["shoes"])).unwrap();
        let second = source.keyword_ideas(&request(&["shoes"])).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_major_order() {
        let source = MockKeywordSource::with_seed(7);
        let records = source.keyword_ideas(&request(&["alpha", "beta"])).unwrap();

        assert_eq!(records.len(), 16);
        assert!(records[..8].iter().all(|r| r.keyword.contains("alpha")));
        assert!(records[8..].iter().all(|r| r.keyword.contains("beta")));
        assert_eq!(records[0].keyword, "alpha купить");
        assert_eq!(records[8].keyword, "beta купить");
    }

    #[test]
    fn test_blank_seed_is_a_fault() {
        let source = MockKeywordSource::new();
        assert!(source.keyword_ideas(&request(&["ok", " "])).is_err());
    }

    #[test]
    fn test_bids_may_invert() {
        // Low and high bids are drawn independently; the only guarantee is
        // that each stays inside its own range.
        let source = MockKeywordSource::with_seed(1);
        let records = source.keyword_ideas(&request(&["a", "b", "c", "d"])).unwrap();

        for r in &records {
            assert!(LOW_BID_RANGE.contains(&r.low_top_of_page_bid));
            assert!(HIGH_BID_RANGE.contains(&r.high_top_of_page_bid));
        }
    }

    #[test]
    fn test_static_metrics() {
        let metrics = MockKeywordSource::new().keyword_metrics("shoes").unwrap();

        assert_eq!(metrics.keyword, "shoes");
        assert_eq!(metrics.avg_monthly_searches, 1000);
        assert_eq!(metrics.competition, Competition::Medium);
        assert_eq!(metrics.competition_index, 50);
        assert_eq!(metrics.low_top_of_page_bid, 50);
        assert_eq!(metrics.high_top_of_page_bid, 200);
    }
}
