//! Geo-target code normalization

/// Geo-target used when a request names no location (Russia)
pub const DEFAULT_LOCATION: &str = "2840";

/// Known geo-target codes and their canonical identifiers
const LOCATION_MAP: &[(&str, &str)] = &[
    ("2840", "2840"), // Russia
    ("2336", "2336"), // Ukraine
    ("2686", "2686"), // Belarus
    ("2826", "2826"), // Kazakhstan / Europe / worldwide
    ("2250", "2250"), // USA
    ("2825", "2825"), // Germany
];

/// Canonical identifier for a single code; unknown codes pass through
pub fn canonical_location(code: &str) -> &str {
    LOCATION_MAP
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(code)
}

/// Normalize a list of location codes, defaulting to [`DEFAULT_LOCATION`]
pub fn normalize_locations(codes: Option<&[String]>) -> Vec<String> {
    match codes {
        None => vec![DEFAULT_LOCATION.to_string()],
        Some(codes) => codes
            .iter()
            .map(|code| canonical_location(code.trim()).to_string())
            .collect(),
    }
}
