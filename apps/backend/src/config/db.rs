use crate::error::AppError;

/// Primary environment variable holding the connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Alias kept for deployments configured with the hosting platform's
/// connection-string naming.
pub const DEFAULT_CONNECTION_VAR: &str = "ConnectionStrings__DefaultConnection";

/// Database engine behind a connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    Sqlite,
}

impl DbKind {
    /// Detect the engine from the URL scheme.
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite" => Ok(DbKind::Sqlite),
            _ => Err(AppError::config(format!(
                "Unsupported database URL scheme '{scheme}'"
            ))),
        }
    }

    /// Engine name for logging
    pub fn engine(self) -> &'static str {
        match self {
            DbKind::Postgres => "postgresql",
            DbKind::Sqlite => "sqlite",
        }
    }
}

/// Resolve the required connection string.
///
/// Fails with a configuration error when neither variable is set or the value
/// is blank; callers treat this as fatal before any socket is bound.
pub fn connection_string<F>(lookup: F) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(DATABASE_URL_VAR)
        .filter(|v| !v.trim().is_empty())
        .or_else(|| lookup(DEFAULT_CONNECTION_VAR))
        .unwrap_or_default();

    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::config(
            "Database connection string is not configured.",
        ));
    }

    DbKind::from_url(value)?;
    Ok(value.to_string())
}

/// Strip credentials from a URL before it reaches the logs.
pub fn sanitize_db_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
