//! CSV downloads of the parts table and the recent ledger.

use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use stockroom_infra::export;

use crate::app::errors;
use crate::app::routes::stock::DEFAULT_HISTORY_LIMIT;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/parts.csv", get(parts_csv))
        .route("/transactions.csv", get(transactions_csv))
}

pub async fn parts_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let parts = match services.stockroom.catalog.search("").await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let mut body = Vec::new();
    if let Err(e) = export::write_parts_csv(&parts, &mut body) {
        return errors::store_error_to_response(e);
    }
    csv_response("spare_parts.csv", body)
}

pub async fn transactions_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let rows = match services.stockroom.reports.history(Some(DEFAULT_HISTORY_LIMIT)).await {
        Ok(r) => r,
        Err(e) => return errors::store_error_to_response(e),
    };

    let mut body = Vec::new();
    if let Err(e) = export::write_transactions_csv(&rows, &mut body) {
        return errors::store_error_to_response(e);
    }
    csv_response("transactions.csv", body)
}

fn csv_response(filename: &str, body: Vec<u8>) -> axum::response::Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
