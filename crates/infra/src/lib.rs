//! Infrastructure layer: product stores, Postgres wiring, configuration.

pub mod config;
pub mod db;
pub mod repositories;

use std::sync::Arc;

use anyhow::Context;
use catalog_products::ProductRepository;
use tracing::{info, warn};

pub use config::{AppConfig, DatabaseConfig};
pub use repositories::{InMemoryProductRepository, PostgresProductRepository};

/// Pick the product store for this process.
///
/// Postgres when `DATABASE_URL` is configured, otherwise an in-memory store
/// that lives as long as the process.
pub async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn ProductRepository>> {
    match &config.database {
        Some(db_config) => {
            let pool = db::connect(db_config)
                .await
                .context("failed to connect to postgres")?;
            db::ensure_schema(&pool)
                .await
                .context("failed to create products table")?;
            info!("using postgres product store");
            Ok(Arc::new(PostgresProductRepository::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set; products are kept in memory and lost on restart");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
    }
}
