use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    config: Option<AppConfig>,
    db_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            config: None,
            db_url: None,
        }
    }

    /// Take signing secret, cookie options and environment from `config`.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.security_config = SecurityConfig::new(config.session_secret.clone());
        self.config = Some(config.clone());
        self
    }

    pub fn with_db(mut self, database_url: impl Into<String>) -> Self {
        self.db_url = Some(database_url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let mut state = match self.db_url {
            // single entrypoint: connect + migrate
            Some(url) => AppState::new(bootstrap_db(&url).await?, self.security_config),
            None => AppState::new_without_db(self.security_config),
        };

        if let Some(config) = self.config {
            state = state
                .with_session_cookie(config.session_cookie)
                .with_env(config.env);
        }
        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
