//! HS256 session tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use thiserror::Error;

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("failed to sign session token: {0}")]
    Signing(String),

    #[error("malformed or forged session token: {0}")]
    Malformed(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}

/// Signs and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> Result<IssuedSession, SessionError> {
        let claims = SessionClaims {
            sub: username.to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        validate_claims(&claims, now)?;

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SessionError::Signing(e.to_string()))?;

        Ok(IssuedSession { token, claims })
    }

    /// Verify the signature, then the claims' time window against `now`.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionError> {
        // Expiry lives in our own claims, not the registered `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|e| SessionError::Malformed(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> SessionIssuer {
        SessionIssuer::new(secret.as_bytes(), Duration::minutes(30))
    }

    #[test]
    fn issued_token_validates_and_carries_subject() {
        let now = Utc::now();
        let iss = issuer("secret");
        let session = iss.issue("employee", now).unwrap();

        assert_eq!(session.claims.expires_at, now + Duration::minutes(30));
        let claims = iss.validate(&session.token, now + Duration::minutes(1)).unwrap();
        assert_eq!(claims.sub, "employee");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let now = Utc::now();
        let token = issuer("one").issue("employee", now).unwrap().token;
        match issuer("two").validate(&token, now) {
            Err(SessionError::Malformed(_)) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let iss = issuer("secret");
        let token = iss.issue("employee", now).unwrap().token;
        assert_eq!(
            iss.validate(&token, now + Duration::minutes(31)),
            Err(SessionError::Claims(TokenValidationError::Expired))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            issuer("secret").validate("not-a-token", Utc::now()),
            Err(SessionError::Malformed(_))
        ));
    }

    #[test]
    fn zero_ttl_cannot_issue() {
        let iss = SessionIssuer::new(b"secret", Duration::zero());
        assert_eq!(
            iss.issue("employee", Utc::now()).unwrap_err(),
            SessionError::Claims(TokenValidationError::InvalidTimeWindow)
        );
    }
}
