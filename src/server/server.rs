//! HTTP server wiring: shared state, middleware and the listen loop

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::planner::{KeywordPlanner, MockKeywordSource};

use super::api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Keyword expansion engine
    pub planner: Arc<KeywordPlanner>,

    /// Configuration, read-only after startup
    pub config: Arc<Config>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, planner: KeywordPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Wordstart Server
// ============================================================================

/// Keyword suggestion HTTP server
pub struct WordstartServer {
    state: AppState,
}

impl WordstartServer {
    /// Create a server backed by the mock keyword source
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let planner = KeywordPlanner::new(
            Arc::new(MockKeywordSource::new()),
            config.upstream.clone(),
        );
        Self::with_planner(config, planner)
    }

    /// Create a server with an explicit planner
    pub fn with_planner(config: Config, planner: KeywordPlanner) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if config.upstream.api_key.is_none() {
            tracing::debug!("No upstream API key configured; serving mock keyword data");
        }

        Ok(Self {
            state: AppState::new(config, planner),
        })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes and middleware
    pub fn build_router(&self) -> Router {
        let config = &self.state.config;
        let mut router = create_router(self.state.clone());

        if config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server and run until the shutdown future resolves
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.state.config.bind_address();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        tracing::info!(
            address = %addr,
            prefix = %self.state.config.path_prefix,
            debug = self.state.config.debug,
            "Wordstart server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("Wordstart server shutdown complete");
        Ok(())
    }

    /// Start the server, stopping on Ctrl-C
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        let config = &self.state.config;
        ServerInfo {
            bind_address: config.bind_address(),
            path_prefix: config.path_prefix.clone(),
            cors_enabled: config.enable_cors,
            request_logging_enabled: config.enable_request_logging,
            debug: config.debug,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub path_prefix: String,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
    pub debug: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Wordstart Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Path Prefix: {}\n\
             CORS: {}\n\
             Request Logging: {}\n\
             Debug: {}",
            "",
            self.bind_address,
            self.path_prefix,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" },
            if self.debug { "on" } else { "off" }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind: {0}")]
    Bind(String),

    #[error("Server error: {0}")]
    Serve(String),
}
