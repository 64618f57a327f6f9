//! Common test utilities

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use wordstart::config::Config;
use wordstart::planner::KeywordPlanner;
use wordstart::server::WordstartServer;

/// Router backed by a seeded planner with default configuration
pub fn test_router() -> Router {
    let server = WordstartServer::with_planner(Config::default(), KeywordPlanner::seeded(2025))
        .expect("default config is valid");
    server.build_router()
}

/// POST a JSON body to the router
pub async fn post_json(router: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    router.oneshot(request).await.unwrap()
}

/// GET a path from the router
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

/// Read a response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Content type header of a response
#[allow(dead_code)]
pub fn content_type(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
