use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

use tg_api::{create_app, AppState};
use tg_core::repositories::{InMemoryRevocationRepository, RevocationRepository};
use tg_core::services::{SchedulerConfig, TokenServiceConfig, TokenSigner};
use tg_infra::database::{DatabasePool, MySqlRevocationRepository};
use tg_shared::config::AppConfig;

/// Start with an in-process ledger instead of MySQL (development only)
const MEMORY_FLAG: &str = "--memory";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!("Starting TokenGate API Server ({})", config.environment);

    if config.auth.is_using_default_secret() {
        warn!("Using the built-in development token secret; set TG__AUTH__SECRET");
    }
    if config.auth.internal_key.is_none() {
        warn!("No internal key configured; /internal routes will refuse every call");
    }

    let use_memory = std::env::args().any(|arg| arg == MEMORY_FLAG);
    let (repository, pool): (Arc<dyn RevocationRepository>, Option<DatabasePool>) = if use_memory {
        if config.environment.is_production() {
            anyhow::bail!("{} is not allowed in production", MEMORY_FLAG);
        }
        warn!("Using in-memory revocation ledger; revocations are lost on restart");
        (Arc::new(InMemoryRevocationRepository::new()), None)
    } else {
        let pool = DatabasePool::new(config.database.clone())
            .await
            .context("Failed to connect to the revocation ledger database")?;
        pool.run_migrations()
            .await
            .context("Failed to apply ledger schema")?;
        info!("{}", pool.get_statistics());

        let repository = MySqlRevocationRepository::new(pool.get_pool().clone());
        (Arc::new(repository), Some(pool))
    };

    let signer = TokenSigner::new(TokenServiceConfig::from(&config.auth))
        .context("Invalid token configuration")?;

    let state = web::Data::new(AppState::new(
        signer,
        repository,
        SchedulerConfig::from(&config.cleanup),
        config.auth.internal_key.clone(),
    ));

    let scheduler = state.scheduler.clone().start();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_state = state.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped, shutting down background tasks");

    if let Some(handle) = scheduler {
        handle.stop().await;
    }
    if let Some(pool) = pool {
        pool.close().await;
    }

    Ok(())
}
