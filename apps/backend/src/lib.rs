#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod controllers;
pub mod entities;
pub mod error;
pub mod infra;
pub mod licensing;
pub mod logging;
pub mod middleware;
pub mod pipeline;
pub mod repos;
pub mod request_context;
pub mod routes;
pub mod routing;
pub mod server;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod views;

pub use config::AppConfig;
pub use error::AppError;
pub use pipeline::build_app;
pub use request_context::RequestContext;
pub use services::dashboard::{
    demo_dashboard, resolve_dashboard, DashboardService, DemoDashboardService, ScopedDashboard,
    UserDashboardService,
};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
