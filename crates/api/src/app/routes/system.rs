use axum::{Json, extract::Extension, http::StatusCode};

use crate::app::dto::WhoAmIResponse;
use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(session): Extension<SessionContext>) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        username: session.username().to_string(),
        expires_at: session.expires_at(),
    })
}
