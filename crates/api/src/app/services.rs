use std::sync::Arc;

use stockroom_auth::{SessionIssuer, StaticCredentials};
use stockroom_infra::Stockroom;

use crate::config::ApiConfig;

/// Everything a handler may need. Shared behind an `Arc`.
#[derive(Debug)]
pub struct AppServices {
    pub stockroom: Stockroom,
    pub credentials: StaticCredentials,
    pub sessions: Arc<SessionIssuer>,
}

impl AppServices {
    pub fn new(stockroom: Stockroom, config: &ApiConfig) -> Self {
        Self {
            stockroom,
            credentials: StaticCredentials::new(config.username.clone(), config.password.clone()),
            sessions: Arc::new(SessionIssuer::new(
                config.session_secret.as_bytes(),
                config.session_ttl,
            )),
        }
    }
}
