//! Process configuration from `STOCKROOM_*` environment variables.
//!
//! Every value has a default suitable for a single workstation. Falling back to
//! the built-in password or session secret is logged at `warn`.

use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_USERNAME: &str = "employee";
pub const DEFAULT_PASSWORD: &str = "smt123";
const DEV_SESSION_SECRET: &str = "dev-session-secret";

#[derive(Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub username: String,
    pub password: String,
    pub session_secret: String,
    pub session_ttl: chrono::Duration,
    pub busy_timeout: Duration,
}

impl ApiConfig {
    /// Defaults for everything except the database location.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            bind_addr: DEFAULT_BIND.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            session_secret: DEV_SESSION_SECRET.to_string(),
            session_ttl: chrono::Duration::minutes(480),
            busy_timeout: Duration::from_secs(5),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::new(
            lookup("STOCKROOM_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        );

        if let Some(bind) = lookup("STOCKROOM_BIND") {
            config.bind_addr = bind;
        }
        if let Some(username) = lookup("STOCKROOM_USERNAME") {
            config.username = username;
        }
        match lookup("STOCKROOM_PASSWORD") {
            Some(password) => config.password = password,
            None => tracing::warn!("STOCKROOM_PASSWORD not set; using built-in default password"),
        }
        match lookup("STOCKROOM_SESSION_SECRET") {
            Some(secret) => config.session_secret = secret,
            None => tracing::warn!("STOCKROOM_SESSION_SECRET not set; using insecure dev default"),
        }
        if let Some(raw) = lookup("STOCKROOM_SESSION_TTL_MINUTES") {
            let minutes: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("STOCKROOM_SESSION_TTL_MINUTES: invalid number {raw:?}"))?;
            anyhow::ensure!(minutes > 0, "STOCKROOM_SESSION_TTL_MINUTES must be positive");
            config.session_ttl = chrono::Duration::minutes(minutes);
        }
        if let Some(raw) = lookup("STOCKROOM_BUSY_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("STOCKROOM_BUSY_TIMEOUT_SECS: invalid number {raw:?}"))?;
            config.busy_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("username", &self.username)
            .field("session_ttl", &self.session_ttl)
            .field("busy_timeout", &self.busy_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let c = config(&[]).unwrap();
        assert_eq!(c.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(c.bind_addr, DEFAULT_BIND);
        assert_eq!(c.username, "employee");
        assert_eq!(c.password, "smt123");
        assert_eq!(c.session_ttl, chrono::Duration::minutes(480));
        assert_eq!(c.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides_are_read() {
        let c = config(&[
            ("STOCKROOM_DATABASE_URL", "sqlite:///var/lib/stockroom/inventory.db"),
            ("STOCKROOM_BIND", "127.0.0.1:9000"),
            ("STOCKROOM_USERNAME", "stores"),
            ("STOCKROOM_PASSWORD", "hunter2"),
            ("STOCKROOM_SESSION_SECRET", "s3cret"),
            ("STOCKROOM_SESSION_TTL_MINUTES", " 15 "),
            ("STOCKROOM_BUSY_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(c.database_url, "sqlite:///var/lib/stockroom/inventory.db");
        assert_eq!(c.bind_addr, "127.0.0.1:9000");
        assert_eq!(c.username, "stores");
        assert_eq!(c.password, "hunter2");
        assert_eq!(c.session_secret, "s3cret");
        assert_eq!(c.session_ttl, chrono::Duration::minutes(15));
        assert_eq!(c.busy_timeout, Duration::from_secs(2));
    }

    #[test]
    fn bad_numbers_are_reported() {
        assert!(config(&[("STOCKROOM_SESSION_TTL_MINUTES", "soon")]).is_err());
        assert!(config(&[("STOCKROOM_SESSION_TTL_MINUTES", "0")]).is_err());
        assert!(config(&[("STOCKROOM_BUSY_TIMEOUT_SECS", "-1")]).is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let out = format!("{:?}", config(&[("STOCKROOM_SESSION_SECRET", "s3cret")]).unwrap());
        assert!(!out.contains("s3cret"));
        assert!(!out.contains("smt123"));
    }
}
