//! Catalog API - product catalog REST server backed by MongoDB

use axum_helpers::server::{create_production_app, CleanupCoordinator};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(url = %config.mongodb.redacted_url(), "Connecting to MongoDB");

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(database = %config.mongodb.database(), "Connected to MongoDB");

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    let app = api::app(
        api::routes(&state),
        api::health::router(state.clone()),
        state.config.app,
    );

    let mut cleanup = CleanupCoordinator::new();
    let client = state.mongo_client.clone();
    cleanup.add_task("mongodb", async move {
        info!("Closing MongoDB connections");
        client.shutdown().await;
    });

    info!(
        port = state.config.server.port,
        environment = ?state.config.environment,
        "Starting Catalog API"
    );

    create_production_app(
        app,
        &state.config.server,
        state.config.shutdown_timeout,
        cleanup.run(),
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
