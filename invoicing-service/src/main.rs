use anyhow::Result;
use secrecy::ExposeSecret;
use tracing::info;

use invoicing_service::config::Config;
use invoicing_service::store::Database;
use invoicing_service::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    service_core::observability::init_tracing("invoicing-service", &config.log_level);

    let db = Database::new(
        config.database.url.expose_secret(),
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    db.run_migrations().await?;
    db.health_check().await?;

    let state = AppState::new(&config, db);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "invoicing-service listening");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
