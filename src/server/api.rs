//! REST API handlers
//!
//! Every route is registered twice: at the root and under the configured
//! path prefix. Errors are always returned as JSON bodies.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Error;
use crate::export::{format_rows, ExportFormat};
use crate::models::{
    ExpansionFailure, ExpansionOutcome, ExpansionRequest, ExpansionResult, ExportRequest,
    KeywordMetrics,
};

use super::server::AppState;

/// Message returned when a keyword request carries no seeds
pub const NO_QUERIES_MESSAGE: &str = "no queries specified";

const INDEX_HTML: &str = include_str!("../../static/index.html");

// ============================================================================
// API Response Types
// ============================================================================

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error returned from a handler
///
/// The keyword expansion endpoint reports errors with an empty `keywords`
/// list next to the message; every other endpoint returns just the message.
#[derive(Debug)]
pub enum ApiError {
    Keywords(Error),
    Plain(Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Keywords(e) => {
                (e.status_code(), Json(ExpansionFailure::new(e.to_string()))).into_response()
            }
            Self::Plain(e) => {
                (e.status_code(), Json(ErrorResponse::new(e.to_string()))).into_response()
            }
        }
    }
}

fn rejection_error(rejection: JsonRejection) -> Error {
    Error::validation(format!("invalid request body: {}", rejection.body_text()))
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let prefix = state.config.path_prefix.clone();

    let router = mount(Router::new(), "").route("/", get(index));
    let router = mount(router, &prefix)
        .route(&prefix, get(index))
        .route(&format!("{prefix}/"), get(index));

    router.with_state(state)
}

fn mount(router: Router<AppState>, base: &str) -> Router<AppState> {
    router
        .route(&format!("{base}/api/keywords"), post(expand_keywords))
        .route(&format!("{base}/api/keyword/{{keyword}}"), get(keyword_details))
        .route(&format!("{base}/api/export"), post(export_keywords))
        .route(&format!("{base}/health"), get(health_check))
}

// ============================================================================
// Handlers
// ============================================================================

/// Landing page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Expand seed keywords into suggestions
async fn expand_keywords(
    State(state): State<AppState>,
    payload: Result<Json<ExpansionRequest>, JsonRejection>,
) -> Result<Json<ExpansionResult>, ApiError> {
    let Json(request) = payload.map_err(|r| ApiError::Keywords(rejection_error(r)))?;

    let seeds = request.seeds();
    if seeds.is_empty() {
        tracing::debug!("Rejecting keyword request without queries");
        return Err(ApiError::Keywords(Error::validation(NO_QUERIES_MESSAGE)));
    }

    tracing::info!(
        seeds = seeds.len(),
        language = %request.language(),
        "Expanding keywords"
    );

    match state
        .planner
        .expand(&seeds, request.language(), request.location.as_deref())
    {
        ExpansionOutcome::Success(result) => {
            tracing::debug!(keywords_count = result.total_count, "Keywords result");
            Ok(Json(result))
        }
        ExpansionOutcome::Failure(failure) => {
            tracing::error!(error = %failure.error, "Keyword expansion failed");
            Err(ApiError::Keywords(Error::internal(failure.error)))
        }
    }
}

/// Static metrics for a single keyword
async fn keyword_details(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<KeywordMetrics>, ApiError> {
    tracing::debug!(keyword = %keyword, "Keyword details requested");

    state
        .planner
        .metrics_for_one(&keyword)
        .map(Json)
        .map_err(|e| {
            tracing::error!(keyword = %keyword, error = %e, "Keyword details failed");
            ApiError::Plain(e)
        })
}

/// Re-serialize records as JSON, CSV or TXT
async fn export_keywords(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|r| ApiError::Plain(rejection_error(r)))?;
    let format = ExportFormat::parse_lenient(request.format.as_deref());

    tracing::info!(records = request.keywords.len(), format = %format, "Exporting keywords");

    let payload = format_rows(&request.keywords, format).map_err(|e| {
        tracing::error!(error = %e, "Export failed");
        ApiError::Plain(Error::internal(e.to_string()))
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, payload.content_type)],
        payload.body,
    )
        .into_response())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("test error");
        assert_eq!(response.error, "test error");
    }

    #[test]
    fn test_validation_error_status() {
        let response = ApiError::Keywords(Error::validation(NO_QUERIES_MESSAGE)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_status() {
        let response = ApiError::Plain(Error::internal("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_index_page_embedded() {
        assert!(INDEX_HTML.contains("/api/keywords"));
    }
}
