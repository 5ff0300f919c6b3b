use budgetwise::server;
use tracing::error;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the environment only:
    // - containers: env_file / --env-file
    // - local dev: source an env file (set -a; . ./.env; set +a)
    let server = match server::start(|key| std::env::var(key).ok()).await {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "startup_failed");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    server.await
}
