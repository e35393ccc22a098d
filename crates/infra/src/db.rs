//! Postgres pool and schema bootstrap.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::DatabaseConfig;

/// Table backing `PostgresProductRepository`. Applied idempotently at startup.
pub const PRODUCTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    base_price  BIGINT,
    currency    TEXT
)
"#;

pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;
    info!(max_connections = config.max_connections, "connected to postgres");
    Ok(pool)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(PRODUCTS_SCHEMA).execute(pool).await?;
    Ok(())
}
