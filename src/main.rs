use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;

use healthdesk_backend::run;
use healthdesk_backend::config::settings::{get_config, DataSourceMode, Settings};
use healthdesk_backend::db::{MemoryStore, PgStore, SharedStore};
use healthdesk_backend::telemetry::{get_subscriber, init_subscriber};

async fn build_store(config: &Settings) -> std::io::Result<SharedStore> {
    match config.application.data_source {
        DataSourceMode::Mock => {
            tracing::warn!("Running against the in-memory store; data is not persisted");
            Ok(Arc::new(MemoryStore::seeded()))
        }
        DataSourceMode::Live => {
            // Only try to establish connection when actually used
            let pool = config
                .database
                .pool_options()
                .connect_lazy(config.database.connection_string().expose_secret())
                .map_err(std::io::Error::other)?;

            let store = PgStore::new(pool);
            store.migrate().await.map_err(std::io::Error::other)?;
            tracing::info!("Database migrations applied");
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = get_config().map_err(std::io::Error::other)?;

    let subscriber = get_subscriber(
        "healthdesk-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let store = build_store(&config).await?;

    let address = config.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, store, config.jwt, config.application.allowed_origins)?.await
}
