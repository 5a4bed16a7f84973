use anyhow::Context;
use catalog_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config).context("failed to initialize tracing")?;

    tracing::info!(
        service = %config.service.name,
        environment = %config.service.environment,
        http_port = config.service.port,
        "Starting catalog service"
    );

    match config.database.clone() {
        Some(database) => {
            let store = PgProductStore::open(&database)
                .await
                .context("failed to connect to the product database")?;

            let result = run(config, store.clone()).await;
            store.close().await;
            result?;
        }
        None => {
            tracing::warn!("No [database] section configured, products are kept in memory");
            run(config, InMemoryProductStore::new()).await?;
        }
    }

    shutdown_tracing();
    Ok(())
}
