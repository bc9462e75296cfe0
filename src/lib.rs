pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes::{build_app, create_router};

pub use config::AppConfig;
pub use error::{MissingField, StoreError};

// Export all model types
pub use model::*;

// Export store types
pub use store::{CartStore, CatalogStore, FileStore, Store};

use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Open the stores described by `config` and apply optional seed data.
///
/// Fails if either collection cannot be read or parsed; nothing should be
/// served in that case.
pub async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<FileStore>> {
    let store = FileStore::open(&config.storage, config.catalog.id_assignment).await?;

    if config.seed.load_demo_data {
        let created = seed::load_seed_data(&store).await?;
        if created > 0 {
            info!("Seeded {created} demo products");
        }
    }

    Ok(Arc::new(store))
}

/// Serve until Ctrl+C or SIGTERM
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let app = build_app(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("Server is running on http://{}", bind_address);
    info!("API documentation available at http://{}/docs", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
