use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Recent transactions on the dashboard when the caller gives no limit.
pub const DEFAULT_DASHBOARD_LIMIT: u32 = 100;

pub fn router() -> Router {
    Router::new()
        .route("/low-stock", get(low_stock))
        .route("/summary", get(summary))
        .route("/dashboard", get(dashboard))
}

pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.stockroom.reports.low_stock().await {
        Ok(parts) => (StatusCode::OK, Json(parts)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::SearchQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    match services.stockroom.reports.summary(query.term()).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::DashboardQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let limit = query.limit.unwrap_or(DEFAULT_DASHBOARD_LIMIT);
    match services.stockroom.reports.dashboard(query.search.trim(), limit).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
