use std::future::Future;
use std::time::{Duration, Instant};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{sanitize_db_url, DbKind};
use crate::error::AppError;
use crate::state::app_state::AppState;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Centralized helper to access the database connection from AppState.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                warn!(
                    "connection_retry=failed attempt={} max_attempts={} interval_ms={} error={}",
                    attempt, max_attempts, interval_ms, e
                );
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Open the connection pool. Does NOT run migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let kind = DbKind::from_url(database_url)?;

    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .max_connections(match kind {
            DbKind::Postgres => 10,
            DbKind::Sqlite => 1,
        })
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = retry_connection(
        || {
            let options = options.clone();
            async move { Database::connect(options).await.map_err(AppError::from) }
        },
        CONNECT_ATTEMPTS,
        CONNECT_INTERVAL_MS,
    )
    .await?;

    info!(
        db_engine = kind.engine(),
        db_url = %sanitize_db_url(database_url),
        "database_connected"
    );
    Ok(conn)
}

/// Connect and bring the schema up to date.
///
/// Runs once during process initialization, before the server accepts
/// traffic. Applying migrations is idempotent, so this is safe on every
/// start.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    apply_migrations(&conn).await?;
    Ok(conn)
}

/// Apply pending schema migrations on an existing connection.
pub async fn apply_migrations(conn: &DatabaseConnection) -> Result<(), AppError> {
    let started = Instant::now();
    migration::apply_pending(conn)
        .await
        .map_err(|e| AppError::db(format!("schema migration failed: {e}")))?;
    info!(
        duration_ms = started.elapsed().as_millis() as u64,
        "schema_migrations_applied"
    );
    Ok(())
}
