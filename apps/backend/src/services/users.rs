//! Account registration and sign-in against the identity store.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::auth::password::{hash_password, verify_password, PasswordOptions};
use crate::entities::users::Model as User;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users as users_repo;

const MAX_EMAIL_LEN: usize = 256;

fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };

    if !well_formed || email.len() > MAX_EMAIL_LEN {
        return Err(AppError::invalid(
            "INVALID_EMAIL",
            "The Email field is not a valid e-mail address.",
        ));
    }
    Ok(())
}

/// Create an account. Accounts are usable immediately; no confirmation step.
pub async fn register<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    password: &str,
    policy: &PasswordOptions,
) -> Result<User, AppError> {
    if let Err(e) = validate_email(email).and_then(|_| policy.validate(password)) {
        security::registration_rejected("invalid_input", email);
        return Err(e);
    }

    if users_repo::find_by_email(conn, email).await?.is_some() {
        security::registration_rejected("duplicate_email", email);
        return Err(AppError::conflict(
            "DUPLICATE_EMAIL",
            format!("Email '{}' is already taken.", email.trim()),
        ));
    }

    let hash = hash_password(password)?;
    let user = users_repo::create_user(conn, email, &hash).await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "User registered");
    Ok(user)
}

/// Check credentials. Unknown email and wrong password fail identically.
pub async fn sign_in<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let Some(user) = users_repo::find_by_email(conn, email).await? else {
        security::login_failed("unknown_email", email);
        return Err(invalid_login());
    };

    if !verify_password(password, &user.password_hash) {
        security::login_failed("bad_password", email);
        return Err(invalid_login());
    }

    info!(user_id = %user.id, "User signed in");
    Ok(user)
}

fn invalid_login() -> AppError {
    AppError::bad_request("INVALID_LOGIN", "Invalid login attempt.")
}
