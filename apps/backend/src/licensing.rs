//! Registration of the front-end component library license.
//!
//! The key is registered once per process during startup. The pages embed
//! it so the client-side components activate without a trial banner.

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::error::AppError;

static REGISTERED: OnceCell<String> = OnceCell::new();

/// Register the license key for the lifetime of the process.
///
/// Registering the same key again is a no-op. A different key after the
/// first registration is ignored with a warning; the first one stays active.
pub fn register_license(key: &str) -> Result<(), AppError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::config("UI license key is empty"));
    }

    let mut newly_set = false;
    let active = REGISTERED.get_or_init(|| {
        newly_set = true;
        key.to_string()
    });

    if newly_set {
        info!(license = %fingerprint(key), "ui_license_registered");
    } else if active != key {
        warn!(
            active = %fingerprint(active),
            ignored = %fingerprint(key),
            "ui_license_already_registered"
        );
    }
    Ok(())
}

/// The active license key, if one has been registered.
pub fn registered_license() -> Option<&'static str> {
    REGISTERED.get().map(String::as_str)
}

/// Short, log-safe prefix of a key.
fn fingerprint(key: &str) -> String {
    let prefix: String = key.chars().take(6).collect();
    format!("{prefix}***")
}
