//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the inventory core plus the session pieces, shared by all handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use stockroom_infra::{DatabaseOptions, Stockroom};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Open the database named by `config` and build the full router.
pub async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let options =
        DatabaseOptions::new(config.database_url.clone()).with_busy_timeout(config.busy_timeout);
    let stockroom = Stockroom::open(options)
        .await
        .with_context(|| format!("failed to open inventory database at {}", config.database_url))?;

    Ok(build_router(stockroom, config))
}

/// Build the router over an already opened inventory core.
pub fn build_router(stockroom: Stockroom, config: &ApiConfig) -> Router {
    let services = Arc::new(AppServices::new(stockroom, config));
    let auth_state = middleware::AuthState {
        sessions: services.sessions.clone(),
    };

    // Protected routes: require a valid session token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::session_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/login", post(routes::session::login))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
