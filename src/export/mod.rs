//! Result formatter
//!
//! Re-serializes keyword records into JSON, CSV or plain text. Pure: no I/O
//! and the input records are never modified.
//!
//! Export input comes back from clients, so rows are read into the lenient
//! [`ExportRecord`]: missing fields default, and competition labels pass
//! through as written.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::models::KeywordRecord;

/// CSV header line consumed verbatim by existing spreadsheets
pub const CSV_HEADER: &str = "Ключевое слово,Средние запросы в месяц,Конкуренция,Конкуренция индекс,Мин. ставка,Макс. ставка";

/// Output encoding for exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    /// Parse a format name; anything unrecognized falls back to JSON
    pub fn parse_lenient(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    /// Content type of the rendered payload
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Txt => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "txt" => Ok(Self::Txt),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

/// Keyword row as received by the export endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportRecord {
    pub keyword: String,
    pub avg_monthly_searches: u64,
    pub competition: String,
    pub competition_index: u64,
    pub low_top_of_page_bid: u64,
    pub high_top_of_page_bid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<u64>,
}

impl From<&KeywordRecord> for ExportRecord {
    fn from(record: &KeywordRecord) -> Self {
        Self {
            keyword: record.keyword.clone(),
            avg_monthly_searches: record.avg_monthly_searches.into(),
            competition: record.competition.as_str().to_string(),
            competition_index: record.competition_index.into(),
            low_top_of_page_bid: record.low_top_of_page_bid.into(),
            high_top_of_page_bid: record.high_top_of_page_bid.into(),
            relevance: Some(record.relevance.into()),
        }
    }
}

/// Rendered export body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub body: String,
    pub content_type: &'static str,
}

/// Render generated records in the requested format
pub fn format_records(records: &[KeywordRecord], format: ExportFormat) -> Result<ExportPayload> {
    let rows: Vec<ExportRecord> = records.iter().map(ExportRecord::from).collect();
    format_rows(&rows, format)
}

/// Render client-supplied rows in the requested format
pub fn format_rows(records: &[ExportRecord], format: ExportFormat) -> Result<ExportPayload> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string(records)?,
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Txt => to_txt(records),
    };

    Ok(ExportPayload {
        body,
        content_type: format.content_type(),
    })
}

fn to_csv(records: &[ExportRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for r in records {
        out.push_str(&csv_field(&r.keyword));
        out.push(',');
        out.push_str(&r.avg_monthly_searches.to_string());
        out.push(',');
        out.push_str(&csv_field(&r.competition));
        out.push(',');
        out.push_str(&r.competition_index.to_string());
        out.push(',');
        out.push_str(&r.low_top_of_page_bid.to_string());
        out.push(',');
        out.push_str(&r.high_top_of_page_bid.to_string());
        out.push('\n');
    }

    out
}

/// Quote a field only when it would otherwise break the row
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn to_txt(records: &[ExportRecord]) -> String {
    records
        .iter()
        .map(|r| r.keyword.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
