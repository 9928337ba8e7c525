use axum::{Router, routing::get};

pub mod export;
pub mod parts;
pub mod reports;
pub mod session;
pub mod stock;
pub mod system;

/// Router for all endpoints that require a session.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/transactions", get(stock::recent_transactions))
        .nest("/parts", parts::router())
        .nest("/reports", reports::router())
        .nest("/export", export::router())
}
