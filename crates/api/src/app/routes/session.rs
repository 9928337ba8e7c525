use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use stockroom_auth::Credentials;

use crate::app::dto::LoginResponse;
use crate::app::errors;
use crate::app::services::AppServices;

/// Exchange the static credentials for a signed session token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let username = match services.credentials.verify(&body) {
        Ok(u) => u,
        Err(e) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                e.to_string(),
            );
        }
    };

    let session = match services.sessions.issue(&username, Utc::now()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to issue session");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_error",
                e.to_string(),
            );
        }
    };

    tracing::info!(username = %username, "session started");

    (
        StatusCode::OK,
        Json(LoginResponse {
            token: session.token,
            username,
            expires_at: session.claims.expires_at,
        }),
    )
        .into_response()
}
