//! Process startup: configuration, licensing, database, HTTP server.

use actix_web::dev::Server;
use actix_web::{web, HttpServer};
use tracing::info;

use crate::config::db::sanitize_db_url;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::state::build_state;
use crate::licensing;
use crate::pipeline::build_app;
use crate::state::app_state::AppState;

/// Everything that must succeed before a port is bound: license
/// registration, database connection and schema migration.
pub async fn bootstrap(config: &AppConfig) -> Result<AppState, AppError> {
    licensing::register_license(&config.ui_license_key)?;

    info!(
        env = ?config.env,
        db_url = %sanitize_db_url(&config.connection_string),
        "bootstrapping"
    );
    build_state()
        .with_config(config)
        .with_db(config.connection_string.clone())
        .build()
        .await
}

/// Bootstrap and bind. The returned server still has to be awaited.
pub async fn launch(config: AppConfig) -> Result<Server, AppError> {
    let state = web::Data::new(bootstrap(&config).await?);
    let host = config.bind_host.clone();
    let port = config.bind_port;

    let server = HttpServer::new(move || build_app(state.clone(), &config))
        .bind((host.as_str(), port))
        .map_err(|e| AppError::config(format!("Failed to bind {host}:{port}: {e}")))?;

    for addr in server.addrs() {
        info!(%addr, "listening");
    }
    Ok(server.run())
}

/// Load configuration through `lookup`, then [`launch`]. Configuration
/// errors surface before anything is bound.
pub async fn start<F>(lookup: F) -> Result<Server, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = AppConfig::from_source(lookup)?;
    launch(config).await
}
