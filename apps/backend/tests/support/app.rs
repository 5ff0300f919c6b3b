use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, Error};
use budgetwise::config::{AppConfig, RuntimeEnv};
use budgetwise::server::bootstrap;
use budgetwise::{build_app, AppState};
use tempfile::TempDir;

/// A migrated SQLite database in a temp dir plus the state built on it.
pub struct TestEnv {
    // dropped with the env, taking the database file with it
    _dir: TempDir,
    pub config: AppConfig,
    pub state: web::Data<AppState>,
}

impl TestEnv {
    pub async fn new() -> Self {
        Self::with_env(RuntimeEnv::Development).await
    }

    pub async fn with_env(env: RuntimeEnv) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("budgetwise.db").display()
        );

        let mut config = AppConfig::for_tests(url);
        config.env = env;
        let state = bootstrap(&config).await.expect("bootstrap test state");

        Self {
            _dir: dir,
            config,
            state: web::Data::new(state),
        }
    }
}

/// Full production pipeline over the env's state.
pub async fn init_app(
    state: web::Data<AppState>,
    config: AppConfig,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(build_app(state, &config)).await
}

