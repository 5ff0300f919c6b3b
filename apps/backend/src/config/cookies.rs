//! Cookie policy and identity session cookie options.
//!
//! Two layers, applied independently:
//! - `CookiePolicyOptions` is enforced on every `Set-Cookie` leaving the
//!   application (see `middleware::cookie_policy`).
//! - `SessionCookieOptions` shapes the identity session cookie itself.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

/// Default identity cookie name.
pub const SESSION_COOKIE_NAME: &str = ".BudgetWise.Identity";

/// Path unauthenticated requests are sent to.
pub const LOGIN_PATH: &str = "/Identity/Account/Login";

/// When the `Secure` attribute is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSecurePolicy {
    SameAsRequest,
    Always,
    None,
}

/// When the `HttpOnly` attribute is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpOnlyPolicy {
    None,
    Always,
}

/// Application-wide cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicyOptions {
    pub minimum_same_site: SameSite,
    pub secure: CookieSecurePolicy,
    pub http_only: HttpOnlyPolicy,
}

impl Default for CookiePolicyOptions {
    fn default() -> Self {
        Self {
            minimum_same_site: SameSite::None,
            secure: CookieSecurePolicy::Always,
            http_only: HttpOnlyPolicy::Always,
        }
    }
}

fn same_site_rank(value: SameSite) -> u8 {
    match value {
        SameSite::None => 0,
        SameSite::Lax => 1,
        SameSite::Strict => 2,
    }
}

impl CookiePolicyOptions {
    /// Raise the cookie's attributes to the policy floor.
    ///
    /// A cookie without `SameSite` is treated as weaker than any explicit
    /// value and receives the minimum. `is_https` only matters for
    /// `CookieSecurePolicy::SameAsRequest`.
    pub fn apply(&self, cookie: &mut Cookie<'_>, is_https: bool) {
        match cookie.same_site() {
            Some(current)
                if same_site_rank(current) >= same_site_rank(self.minimum_same_site) => {}
            _ => cookie.set_same_site(self.minimum_same_site),
        }

        match self.secure {
            CookieSecurePolicy::Always => cookie.set_secure(true),
            CookieSecurePolicy::SameAsRequest => cookie.set_secure(is_https),
            CookieSecurePolicy::None => {}
        }

        if self.http_only == HttpOnlyPolicy::Always {
            cookie.set_http_only(true);
        }
    }
}

/// Identity session cookie shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookieOptions {
    pub name: String,
    pub http_only: bool,
    pub secure: CookieSecurePolicy,
    pub same_site: SameSite,
    pub lifetime: Duration,
    pub sliding_expiration: bool,
    pub login_path: String,
}

impl Default for SessionCookieOptions {
    fn default() -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            http_only: true,
            secure: CookieSecurePolicy::Always,
            same_site: SameSite::Lax,
            lifetime: Duration::days(14),
            sliding_expiration: true,
            login_path: LOGIN_PATH.to_string(),
        }
    }
}

impl SessionCookieOptions {
    /// Build the cookie carrying a freshly minted session token.
    pub fn issue(&self, token: String) -> Cookie<'static> {
        Cookie::build(self.name.clone(), token)
            .path("/")
            .http_only(self.http_only)
            .secure(self.secure != CookieSecurePolicy::None)
            .same_site(self.same_site)
            .max_age(self.lifetime)
            .finish()
    }

    /// Build the cookie that clears the session on the client.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.issue(String::new());
        cookie.make_removal();
        cookie
    }
}
