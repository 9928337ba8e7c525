use chrono::{DateTime, Utc};

use stockroom_auth::SessionClaims;

/// Authenticated session for a request.
///
/// Inserted by the session middleware; every protected handler can rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    username: String,
    expires_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(username: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            expires_at,
        }
    }

    /// The acting user recorded on ledger rows.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl From<SessionClaims> for SessionContext {
    fn from(claims: SessionClaims) -> Self {
        Self::new(claims.sub, claims.expires_at)
    }
}
