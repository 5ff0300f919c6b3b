pub mod app;
pub mod cookies;
pub mod db;

pub use app::{AppConfig, DomainRedirectRule, RuntimeEnv};
pub use cookies::{CookiePolicyOptions, CookieSecurePolicy, HttpOnlyPolicy, SessionCookieOptions};
