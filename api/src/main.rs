use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use ed_api::bootstrap::{self, Services};
use ed_api::{create_app, telemetry};
use ed_core::repositories::{AccountRepository, CompanyRepository, TransactionManager};
use ed_shared::{AppConfig, DatabaseBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging);

    info!(
        environment = ?config.environment,
        backend = ?config.database.backend,
        "Starting EDash API server"
    );
    if config.auth.jwt.is_using_default_secret() {
        warn!("auth.jwt.secret is the built-in default; set JWT_SIGNATURE_KEY");
    }

    match config.database.backend {
        DatabaseBackend::Memory => {
            let services = bootstrap::memory_services(&config)?;
            run_server(&config, services).await
        }
        DatabaseBackend::Mysql => run_mysql(&config).await,
    }
}

#[cfg(feature = "mysql")]
async fn run_mysql(config: &AppConfig) -> anyhow::Result<()> {
    let services = bootstrap::mysql_services(config)
        .await
        .context("failed to initialise MySQL storage")?;
    run_server(config, services).await
}

#[cfg(not(feature = "mysql"))]
async fn run_mysql(_config: &AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("this build has no MySQL support; set database.backend = \"memory\"")
}

async fn run_server<M, A, C>(config: &AppConfig, services: Services<M, A, C>) -> anyhow::Result<()>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let state = web::Data::new(services.state);
    let tokens = web::Data::from(services.tokens);
    let json_limit = config.server.max_payload_size;

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server =
        HttpServer::new(move || create_app(state.clone(), tokens.clone(), json_limit));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
