//! Core data structures for keyword expansion
//!
//! Records produced by the planner, the result envelopes returned to
//! callers, and the request bodies accepted by the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::export::ExportRecord;

/// Default language code when a request omits one
pub const DEFAULT_LANGUAGE: &str = "ru";

// ============================================================================
// Competition
// ============================================================================

/// Coarse bidding-pressure indicator for a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Competition {
    Low,
    Medium,
    High,
}

impl Competition {
    /// All levels, in ascending order
    pub const ALL: [Competition; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Competition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(format!("Unknown competition level: {s}")),
        }
    }
}

// ============================================================================
// Keyword Records
// ============================================================================

/// One generated keyword suggestion with its metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub avg_monthly_searches: u32,
    pub competition: Competition,
    pub competition_index: u8,
    /// Not guaranteed to be below `high_top_of_page_bid`
    pub low_top_of_page_bid: u32,
    pub high_top_of_page_bid: u32,
    pub relevance: u8,
}

/// Metrics for a single keyword, without variant expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub keyword: String,
    pub avg_monthly_searches: u32,
    pub competition: Competition,
    pub competition_index: u8,
    pub low_top_of_page_bid: u32,
    pub high_top_of_page_bid: u32,
}

// ============================================================================
// Expansion Results
// ============================================================================

/// Successful expansion of a set of seed keywords
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionResult {
    pub keywords: Vec<KeywordRecord>,
    pub total_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl ExpansionResult {
    /// Wrap generated records, stamping the current instant
    pub fn new(keywords: Vec<KeywordRecord>) -> Self {
        Self {
            total_count: keywords.len(),
            keywords,
            timestamp: Utc::now(),
        }
    }
}

/// Failure value returned in place of an expansion result
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionFailure {
    pub error: String,
    pub keywords: Vec<KeywordRecord>,
}

impl ExpansionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            keywords: Vec::new(),
        }
    }
}

/// Outcome of [`KeywordPlanner::expand`](crate::planner::KeywordPlanner::expand)
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExpansionOutcome {
    Success(ExpansionResult),
    Failure(ExpansionFailure),
}

impl ExpansionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Generated records; empty on failure
    pub fn keywords(&self) -> &[KeywordRecord] {
        match self {
            Self::Success(result) => &result.keywords,
            Self::Failure(failure) => &failure.keywords,
        }
    }

    /// Error message, if the expansion failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.error),
        }
    }
}

// ============================================================================
// Request Bodies
// ============================================================================

/// Body of `POST /api/keywords`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpansionRequest {
    #[serde(default)]
    pub queries: Option<Vec<String>>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub location: Option<Vec<String>>,
}

impl ExpansionRequest {
    /// Language code, falling back to [`DEFAULT_LANGUAGE`]
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Seed keywords with surrounding whitespace trimmed and blanks dropped
    pub fn seeds(&self) -> Vec<String> {
        self.queries
            .iter()
            .flatten()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body of `POST /api/export`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub keywords: Vec<ExportRecord>,

    #[serde(default)]
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_serializes_uppercase() {
        let json = serde_json::to_string(&Competition::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");

        let parsed: Competition = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, Competition::High);
    }

    #[test]
    fn test_competition_from_str() {
        assert_eq!("low".parse::<Competition>().unwrap(), Competition::Low);
        assert!("extreme".parse::<Competition>().is_err());
    }

    #[test]
    fn test_record_requires_all_fields() {
        let result = serde_json::from_str::<KeywordRecord>(r#"{"keyword": "shoes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_outcome_shape() {
        let outcome = ExpansionOutcome::Failure(ExpansionFailure::new("boom"));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["error"], "boom");
        assert_eq!(value["keywords"], serde_json::json!([]));
        assert!(outcome.keywords().is_empty());
    }

    #[test]
    fn test_success_outcome_shape() {
        let outcome = ExpansionOutcome::Success(ExpansionResult::new(Vec::new()));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["total_count"], 0);
        assert!(value.get("timestamp").is_some());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_expansion_request_defaults() {
        let request: ExpansionRequest =
            serde_json::from_str(r#"{"queries": ["telefon"]}"#).unwrap();

        assert_eq!(request.language(), "ru");
        assert!(request.location.is_none());
    }

    #[test]
    fn test_expansion_request_drops_blank_seeds() {
        let request = ExpansionRequest {
            queries: Some(vec!["  ".to_string(), " shoes ".to_string()]),
            ..Default::default()
        };

        assert_eq!(request.seeds(), vec!["shoes".to_string()]);
    }

    #[test]
    fn test_expansion_request_null_queries() {
        let request: ExpansionRequest = serde_json::from_str(r#"{"queries": null}"#).unwrap();
        assert!(request.seeds().is_empty());
    }
}
