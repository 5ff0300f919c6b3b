//! Claims carried by the identity session cookie.

use serde::{Deserialize, Serialize};

/// Claims inserted into request extensions by the authentication middleware.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// User id (users.id)
    pub sub: String,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl SessionClaims {
    /// Sliding expiration: re-issue once more than half the lifetime is used.
    pub fn needs_refresh(&self, now_secs: i64) -> bool {
        let half = (self.exp - self.iat) / 2;
        now_secs - self.iat > half
    }
}
