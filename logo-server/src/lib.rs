//! # Saorsa Logo Server Library
//!
//! Shared types and functionality for the logo server.
//! This library is used by both the binary and integration tests.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use logo_core::{LogoError, LogoResult};

pub mod config;
pub mod error;
pub mod gemini;
pub mod health;
pub mod metrics;
pub mod orchestrator;
pub mod provider;
pub mod routes;
pub mod strategy;
pub mod validation;

pub use config::{GeminiSettings, ServerConfig};
pub use gemini::GeminiClient;
pub use orchestrator::Orchestrator;
pub use provider::ProviderError;

/// Shared application state.
///
/// Holds only read-only configuration and a pooled HTTP client; every
/// request builds its own orchestrator.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    http: reqwest::Client,
}

impl AppState {
    /// Create state for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client fails to build.
    pub fn new(config: ServerConfig) -> Result<Self, ProviderError> {
        let http = GeminiClient::build_http(&config.gemini)?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the standard generation chain using `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::Configuration`] if the provider base URL is invalid.
    pub fn orchestrator(&self, api_key: &str) -> LogoResult<Orchestrator> {
        let client = GeminiClient::with_http(self.http.clone(), &self.config.gemini, api_key)
            .map_err(|e| LogoError::Configuration(format!("invalid provider configuration: {e}")))?;
        Ok(Orchestrator::for_provider(Arc::new(client)))
    }
}

/// Routes for generation, catalog and health endpoints.
///
/// Request durations are recorded per route. Remaining middleware (CORS,
/// tracing, request IDs) and `/metrics` are added by the binary.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness)) // Backward compatible
        .route("/api/generate", post(routes::generate_handler))
        .route("/api/options", get(routes::options_handler))
        .route_layer(middleware::from_fn(metrics::track_http_requests))
        .with_state(state)
}
