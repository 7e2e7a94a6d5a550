//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /s/{code}`              - Short link redirect
//! - `GET  /health`                - Health check
//! - `POST /api/v1/shorten`        - Create a short link
//! - `GET  /api/v1/stats/{code}`   - Record and usage counter
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - Panics become `500 {"detail": "Unknown error"}`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with state and middleware applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/s/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api::routes::api_routes())
        .with_state(state)
        .layer(panic::layer())
        .layer(tracing::layer())
}

/// Constructs the application service served by [`crate::server::run`].
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
