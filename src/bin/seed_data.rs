//! Seed data script - loads the starter supply-room catalog
//!
//! Run with: cargo run --bin seed-data
//!
//! Items already present keep their quantities; only missing ids are inserted.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stockroom_api::{
    config, db,
    repositories::StockRepository,
    seed::{load_starter_catalog, STARTER_CATALOG},
    services::StockService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    info!("=== Stockroom Seed Data ===");

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let pool = Arc::new(pool);
    let repo = StockRepository::new(pool);
    let stock = StockService::new(repo.clone());

    let inserted = load_starter_catalog(&repo, &stock)
        .await
        .context("failed to load starter catalog")?;

    info!(
        "Inserted {} of {} catalog items ({} already present)",
        inserted,
        STARTER_CATALOG.len(),
        STARTER_CATALOG.len() - inserted
    );
    Ok(())
}
