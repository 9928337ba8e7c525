use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use stockroom_core::DomainError;

use crate::app::routes::stock;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(search_parts).post(create_part))
        .route("/:id", get(get_part).put(update_part).delete(delete_part))
        .route("/:id/transactions", get(stock::part_transactions))
        .route("/:id/adjust", post(stock::adjust_stock))
}

pub async fn search_parts(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::SearchQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    match services.stockroom.catalog.search(query.term()).await {
        Ok(parts) => (StatusCode::OK, Json(parts)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_part(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::PartRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.stockroom.catalog.insert(body.into()).await {
        Ok(part) => (StatusCode::CREATED, Json(part)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_part(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_part_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stockroom.catalog.get(id).await {
        Ok(Some(part)) => (StatusCode::OK, Json(part)).into_response(),
        Ok(None) => errors::domain_error_to_response(DomainError::not_found(id)),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Administrative overwrite of every field, quantity included. Not recorded
/// in the ledger.
pub async fn update_part(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::PartRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_part_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.stockroom.catalog.update(id, body.into()).await {
        Ok(part) => (StatusCode::OK, Json(part)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_part(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_part_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stockroom.catalog.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
