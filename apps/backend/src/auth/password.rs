//! Password rules and hashing.
//!
//! Rules mirror the account registration policy: at least six characters
//! with a digit, a lowercase letter and a non-alphanumeric character.
//! Uppercase letters are not required.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordOptions {
    pub required_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            required_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: false,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordOptions {
    /// Every rule the candidate breaks, in a stable order.
    pub fn violations(&self, candidate: &str) -> Vec<&'static str> {
        let mut out = Vec::new();
        if candidate.chars().count() < self.required_length {
            out.push("Passwords must be at least the required length.");
        }
        if self.require_non_alphanumeric && candidate.chars().all(char::is_alphanumeric) {
            out.push("Passwords must have at least one non alphanumeric character.");
        }
        if self.require_digit && !candidate.chars().any(|c| c.is_ascii_digit()) {
            out.push("Passwords must have at least one digit ('0'-'9').");
        }
        if self.require_lowercase && !candidate.chars().any(char::is_lowercase) {
            out.push("Passwords must have at least one lowercase ('a'-'z').");
        }
        if self.require_uppercase && !candidate.chars().any(char::is_uppercase) {
            out.push("Passwords must have at least one uppercase ('A'-'Z').");
        }
        out
    }

    pub fn validate(&self, candidate: &str) -> Result<(), AppError> {
        let violations = self.violations(candidate);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::invalid("WEAK_PASSWORD", violations.join(" ")))
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// `false` for a wrong password or an unparseable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
