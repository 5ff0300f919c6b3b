//! Identity primitives: session tokens, password hashing, request identity.

pub mod claims;
pub mod identity;
pub mod password;
pub mod session;

pub use claims::SessionClaims;
pub use identity::{CurrentUser, Identity};
pub use session::{mint_session_token, verify_session_token, SessionTokenError};
