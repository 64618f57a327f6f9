use anyhow::{bail, Result};

use wordstart::export::{format_records, ExportFormat};
use wordstart::models::ExpansionOutcome;
use wordstart::planner::KeywordPlanner;

/// Parameters for the offline expand command
pub struct ExpandParams {
    pub seeds: Vec<String>,
    pub language: String,
    pub locations: Vec<String>,
    pub format: String,
    pub seed: Option<u64>,
}

/// Expand seeds and render the records in the requested format
pub fn expand(params: ExpandParams) -> Result<String> {
    let seeds: Vec<String> = params
        .seeds
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if seeds.is_empty() {
        bail!("no queries specified");
    }

    let planner = match params.seed {
        Some(seed) => KeywordPlanner::seeded(seed),
        None => KeywordPlanner::mock(),
    };

    let locations = (!params.locations.is_empty()).then_some(params.locations.as_slice());

    let result = match planner.expand(&seeds, &params.language, locations) {
        ExpansionOutcome::Success(result) => result,
        ExpansionOutcome::Failure(failure) => bail!("Keyword expansion failed: {}", failure.error),
    };

    tracing::info!(total = result.total_count, "Keywords generated");

    let format = ExportFormat::parse_lenient(Some(&params.format));
    let payload = format_records(&result.keywords, format)?;
    Ok(payload.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seeds: &[&str], format: &str) -> ExpandParams {
        ExpandParams {
            seeds: seeds.iter().map(|s| s.to_string()).collect(),
            language: "ru".to_string(),
            locations: Vec::new(),
            format: format.to_string(),
            seed: Some(11),
        }
    }

    #[test]
    fn test_expand_txt() {
        let output = expand(params(&["shoes"], "txt")).unwrap();
        assert_eq!(output.lines().count(), 8);
    }

    #[test]
    fn test_expand_rejects_blank_seeds() {
        assert!(expand(params(&["  "], "json")).is_err());
    }
}
