//! Static credential check.
//!
//! One configured account. This is a gate in front of the shell, not a
//! security model: there is no user table, no hashing and no lockout.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("invalid username or password")]
    InvalidCredentials,
}

#[derive(Clone)]
pub struct StaticCredentials {
    account: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: Credentials::new(username, password),
        }
    }

    /// Returns the authenticated username on an exact match.
    pub fn verify(&self, attempt: &Credentials) -> Result<String, CredentialError> {
        if attempt.username == self.account.username && attempt.password == self.account.password {
            Ok(attempt.username.clone())
        } else {
            tracing::warn!(username = %attempt.username, "login rejected");
            Err(CredentialError::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.account.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_accepted() {
        let creds = StaticCredentials::new("employee", "smt123");
        assert_eq!(
            creds.verify(&Credentials::new("employee", "smt123")),
            Ok("employee".to_string())
        );
    }

    #[test]
    fn wrong_password_or_username_is_rejected() {
        let creds = StaticCredentials::new("employee", "smt123");
        for (u, p) in [
            ("employee", "wrong"),
            ("admin", "smt123"),
            ("Employee", "smt123"),
            ("", ""),
        ] {
            assert_eq!(
                creds.verify(&Credentials::new(u, p)),
                Err(CredentialError::InvalidCredentials)
            );
        }
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = StaticCredentials::new("employee", "smt123");
        let out = format!("{creds:?}");
        assert!(out.contains("employee"));
        assert!(!out.contains("smt123"));
    }

    #[test]
    fn credentials_deserialize_from_login_body() {
        let c: Credentials =
            serde_json::from_str(r#"{"username":"employee","password":"smt123"}"#).unwrap();
        assert_eq!(c, Credentials::new("employee", "smt123"));
    }
}
