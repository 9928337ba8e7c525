use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use stockroom_core::DomainError;
use stockroom_inventory::{Direction, StockAdjustment};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

/// Ledger rows shown when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: u32 = 200;

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::AdjustStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_part_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let direction: Direction = match body.action.trim().to_ascii_uppercase().parse() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let cmd = StockAdjustment::new(id, direction, body.quantity, session.username())
        .with_remarks(body.remarks.unwrap_or_default());

    match services.stockroom.adjustments.adjust(cmd).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn part_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_part_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stockroom.catalog.get(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return errors::domain_error_to_response(DomainError::not_found(id)),
        Err(e) => return errors::store_error_to_response(e),
    }

    match services.stockroom.ledger.for_part(id).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn recent_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::LimitQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match services.stockroom.ledger.recent(limit).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
