//! Process-wide application configuration.
//!
//! Loaded once at startup from the environment. Values that used to be
//! literals at their point of use (license key, redirect hosts) live here so
//! there is exactly one place they are defined.

use std::env;
use std::path::PathBuf;

use super::cookies::{CookiePolicyOptions, SessionCookieOptions};
use super::db;
use crate::error::AppError;

/// Host that has been retired in favor of [`CANONICAL_ORIGIN`].
pub const DEPRECATED_HOST: &str = "budgetwise-expense-tracker-f4aae4b8ebbc.herokuapp.com";

/// Scheme and host every deprecated-host request is sent to.
pub const CANONICAL_ORIGIN: &str = "https://www.budget-wise.net";

/// License key for the front-end component library.
pub const DEFAULT_UI_LICENSE_KEY: &str =
    "Ngo9BigBOggjHTQxAR8/V1NMaF5cXmBCf1FpRmJGdld5fUVHYVZUTXxaS00DNHVRdkdmWXxcc3VQR2ZZWE10X0c=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Development,
    Production,
}

impl RuntimeEnv {
    fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(RuntimeEnv::Production),
            Some(v) if v.eq_ignore_ascii_case("development") => Ok(RuntimeEnv::Development),
            Some(v) if v.eq_ignore_ascii_case("production") => Ok(RuntimeEnv::Production),
            Some(other) => Err(AppError::config(format!(
                "APP_ENV must be Development or Production, got '{other}'"
            ))),
        }
    }

    pub fn is_development(self) -> bool {
        self == RuntimeEnv::Development
    }
}

/// Host-based redirect rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRedirectRule {
    pub deprecated_host: String,
    pub canonical_origin: String,
}

impl Default for DomainRedirectRule {
    fn default() -> Self {
        Self {
            deprecated_host: DEPRECATED_HOST.to_string(),
            canonical_origin: CANONICAL_ORIGIN.to_string(),
        }
    }
}

impl DomainRedirectRule {
    /// Redirect target for a request, or `None` when the host is not the
    /// deprecated one.
    ///
    /// The host comparison is an exact, case-sensitive string match on the
    /// Host header as received (port included). `query` is the raw query
    /// string without its leading `?`, `None` when the request had no `?`.
    /// A bare `?` (`Some("")`) is kept in the target.
    pub fn redirect_target(&self, host: &str, path: &str, query: Option<&str>) -> Option<String> {
        if host != self.deprecated_host {
            return None;
        }

        let query_len = query.map_or(0, |q| q.len() + 1);
        let mut target = String::with_capacity(self.canonical_origin.len() + path.len() + query_len);
        target.push_str(&self.canonical_origin);
        target.push_str(path);
        if let Some(query) = query {
            target.push('?');
            target.push_str(query);
        }
        Some(target)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: RuntimeEnv,
    pub bind_host: String,
    pub bind_port: u16,
    pub connection_string: String,
    pub ui_license_key: String,
    pub session_secret: Vec<u8>,
    pub wwwroot: PathBuf,
    pub redirect: DomainRedirectRule,
    pub cookie_policy: CookiePolicyOptions,
    pub session_cookie: SessionCookieOptions,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// The connection string is validated first so a missing database
    /// configuration is always the reported failure.
    pub fn from_source<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string = db::connection_string(&lookup)?;
        let env = RuntimeEnv::parse(lookup("APP_ENV").as_deref())?;

        let bind_host = lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let bind_port = match lookup("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => 8080,
        };

        let ui_license_key = lookup("UI_LICENSE_KEY")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UI_LICENSE_KEY.to_string());

        let session_secret = match lookup("SESSION_SECRET").filter(|v| !v.is_empty()) {
            Some(secret) => secret.into_bytes(),
            None if env.is_development() => rand::random::<[u8; 32]>().to_vec(),
            None => {
                return Err(AppError::config(
                    "SESSION_SECRET must be set outside Development",
                ))
            }
        };

        let wwwroot = lookup("WWWROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("wwwroot"));

        Ok(Self {
            env,
            bind_host,
            bind_port,
            connection_string,
            ui_license_key,
            session_secret,
            wwwroot,
            redirect: DomainRedirectRule::default(),
            cookie_policy: CookiePolicyOptions::default(),
            session_cookie: SessionCookieOptions::default(),
        })
    }

    /// Configuration for tests: development mode, fixed secret.
    pub fn for_tests(connection_string: impl Into<String>) -> Self {
        Self {
            env: RuntimeEnv::Development,
            bind_host: "127.0.0.1".to_string(),
            bind_port: 0,
            connection_string: connection_string.into(),
            ui_license_key: DEFAULT_UI_LICENSE_KEY.to_string(),
            session_secret: b"test_secret_key_for_testing_purposes_only".to_vec(),
            wwwroot: PathBuf::from("wwwroot"),
            redirect: DomainRedirectRule::default(),
            cookie_policy: CookiePolicyOptions::default(),
            session_cookie: SessionCookieOptions::default(),
        }
    }
}
