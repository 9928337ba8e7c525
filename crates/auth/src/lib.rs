//! `stockroom-auth`: session boundary for the presentation shell.
//!
//! A single static credential check, session claims and signed session
//! tokens. Nothing here touches HTTP or storage.

pub mod claims;
pub mod credentials;
pub mod token;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use credentials::{CredentialError, Credentials, StaticCredentials};
pub use token::{IssuedSession, SessionError, SessionIssuer};
