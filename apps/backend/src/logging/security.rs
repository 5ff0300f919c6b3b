//! Security-relevant events, logged with a stable `event` field.

use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

pub fn registration_rejected(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_REGISTRATION_REJECTED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Registration rejected"
    );
}

/// A session cookie was presented but could not be verified.
pub fn session_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_SESSION_REJECTED",
        %trace_id,
        reason,
        "Session cookie rejected"
    );
}

pub fn login_redirect(path: &str) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_LOGIN_REDIRECT",
        %trace_id,
        path,
        "Anonymous request to protected route"
    );
}
