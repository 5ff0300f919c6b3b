use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::password::PasswordOptions;
use crate::config::{RuntimeEnv, SessionCookieOptions};

/// Application state shared by every worker.
///
/// Holds only process-wide, immutable or pool-backed resources. Anything
/// tied to a single request (identity, dashboard binding) lives in request
/// extensions instead.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database pool (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Session token signing settings
    pub security: SecurityConfig,
    /// Identity cookie shape, used when signing in and out
    pub session_cookie: SessionCookieOptions,
    /// Password rules for registration
    pub passwords: PasswordOptions,
    pub env: RuntimeEnv,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            ..Self::new_without_db(security)
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            session_cookie: SessionCookieOptions::default(),
            passwords: PasswordOptions::default(),
            env: RuntimeEnv::Production,
        }
    }

    pub fn with_session_cookie(mut self, options: SessionCookieOptions) -> Self {
        self.session_cookie = options;
        self
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
