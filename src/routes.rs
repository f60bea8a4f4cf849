//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{identifier}` - Alias redirect (public)
//! - `GET  /health`       - Health check (public)
//! - `/api/*`             - REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on `/api`

use axum::routing::get;
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/{identifier}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
