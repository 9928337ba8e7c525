use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use stockroom_auth::SessionIssuer;

use crate::app::errors;
use crate::context::SessionContext;

#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<SessionIssuer>,
}

pub async fn session_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).ok_or_else(|| {
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing bearer token")
    })?;

    let claims = state.sessions.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "session token rejected");
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string())
    })?;

    req.extensions_mut().insert(SessionContext::from(claims));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
