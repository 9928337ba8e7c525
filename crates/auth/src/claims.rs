use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a session token.
///
/// The shell owns these; the inventory core never sees them apart from the
/// subject, which becomes the acting user of an adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Authenticated username.
    pub sub: String,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("token has no subject")]
    MissingSubject,
}

/// Deterministically validate session claims against `now`.
///
/// Signature checking happens in [`crate::SessionIssuer::validate`]; this only
/// looks at the decoded claims.
pub fn validate_claims(
    claims: &SessionClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.sub.trim().is_empty() {
        return Err(TokenValidationError::MissingSubject);
    }
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn claims(issued_at: DateTime<Utc>, ttl: Duration) -> SessionClaims {
        SessionClaims {
            sub: "employee".to_string(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn valid_inside_window() {
        let c = claims(t0(), Duration::minutes(10));
        assert_eq!(validate_claims(&c, t0()), Ok(()));
        assert_eq!(validate_claims(&c, t0() + Duration::minutes(9)), Ok(()));
    }

    #[test]
    fn expiry_is_exclusive() {
        let c = claims(t0(), Duration::minutes(10));
        assert_eq!(
            validate_claims(&c, t0() + Duration::minutes(10)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn future_tokens_are_rejected() {
        let c = claims(t0(), Duration::minutes(10));
        assert_eq!(
            validate_claims(&c, t0() - Duration::seconds(1)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let c = claims(t0(), Duration::zero());
        assert_eq!(validate_claims(&c, t0()), Err(TokenValidationError::InvalidTimeWindow));
    }

    #[test]
    fn blank_subject_is_rejected() {
        let mut c = claims(t0(), Duration::minutes(10));
        c.sub = "  ".to_string();
        assert_eq!(validate_claims(&c, t0()), Err(TokenValidationError::MissingSubject));
    }
}
