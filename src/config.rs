use serde::Deserialize;

pub const DEFAULT_SECRET_KEY: &str = "iuhjkl123";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite";

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub remember_days: i64,
    /// Where anonymous users are sent when a route requires login.
    pub login_view: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub secret_key: String,
    pub database_url: String,
    pub max_connections: u32,
    pub session: SessionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".into(),
            remember_days: 365,
            login_view: Some("/login".into()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.into(),
            database_url: DEFAULT_DATABASE_URL.into(),
            max_connections: 5,
            session: SessionConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let session = SessionConfig {
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .unwrap_or(defaults.session.cookie_name),
            remember_days: std::env::var("REMEMBER_COOKIE_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(defaults.session.remember_days),
            login_view: defaults.session.login_view,
        };
        Self {
            secret_key: std::env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.max_connections),
            session,
        }
    }

    /// Single-connection in-memory database, used by tests.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scaffold_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.secret_key, "iuhjkl123");
        assert_eq!(cfg.database_url, "sqlite://db.sqlite");
        assert_eq!(cfg.session.cookie_name, "session");
        assert_eq!(cfg.session.login_view.as_deref(), Some("/login"));
    }

    #[test]
    fn in_memory_keeps_secret_key() {
        let cfg = AppConfig::in_memory();
        assert_eq!(cfg.secret_key, DEFAULT_SECRET_KEY);
        assert_eq!(cfg.max_connections, 1);
    }
}
