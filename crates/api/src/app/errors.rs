use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::{DomainError, PartId};
use stockroom_infra::StoreError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::DuplicateKey(_) => StatusCode::CONFLICT,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidOperation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        other => {
            tracing::error!(error = %other, "store operation failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", other.to_string())
        }
    }
}

/// A body that failed to parse gets the same JSON error shape as a domain
/// rejection, with axum's status (400 syntax, 415 content type, 422 data).
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_query", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_part_id(raw: &str) -> Result<PartId, axum::response::Response> {
    raw.parse::<PartId>()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid part id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::validation("quantity", "must be positive"), StatusCode::BAD_REQUEST),
            (DomainError::duplicate_key("BRG-6204"), StatusCode::CONFLICT),
            (DomainError::not_found(PartId::new(1)), StatusCode::NOT_FOUND),
            (
                DomainError::invalid_operation("insufficient stock"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }

    #[test]
    fn database_failures_are_internal_errors() {
        let err = StoreError::Database {
            operation: "insert_part",
            message: "database is locked".to_string(),
        };
        assert_eq!(store_error_to_response(err).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn part_ids_must_be_integers() {
        assert_eq!(parse_part_id("42").unwrap(), PartId::new(42));
        assert_eq!(parse_part_id("abc").unwrap_err().status(), StatusCode::BAD_REQUEST);
    }
}
