//! Postgres-backed product repository.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `RepositoryError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|-----------------------|-----------------|
//! | Database | class `23` (integrity constraint) | `Constraint` |
//! | Database | any other | `Storage` |
//! | PoolTimedOut / PoolClosed / Io / Tls | N/A | `Unavailable` |
//! | ColumnDecode / ColumnNotFound | N/A | `Decode` |
//! | Other | N/A | `Storage` |
//!
//! ## Identity
//!
//! `products.id` is an identity column. Transient products take the next
//! value; products saved under an explicit id are upserted and the identity
//! sequence is moved past the largest stored id inside the same transaction.

use std::sync::Arc;

use sqlx::{FromRow, PgPool};
use tracing::instrument;

use catalog_products::{
    PricingMetadata, Product, ProductId, ProductRepository, RepositoryError, RepositoryResult,
};

/// Postgres-backed product store.
///
/// Uses the SQLx connection pool, which is `Send + Sync` and can be shared
/// across request handlers.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    base_price: Option<i64>,
    currency: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = ProductId::new(row.id).map_err(|e| RepositoryError::Decode(e.to_string()))?;
        let base_price = row
            .base_price
            .map(u64::try_from)
            .transpose()
            .map_err(|_| {
                RepositoryError::Decode(format!("product {id} has a negative base_price"))
            })?;

        Ok(Product {
            id: Some(id),
            name: row.name,
            description: row.description,
            pricing: PricingMetadata {
                base_price,
                currency: row.currency,
            },
        })
    }
}

fn price_column(product: &Product) -> RepositoryResult<Option<i64>> {
    product
        .pricing
        .base_price
        .map(i64::try_from)
        .transpose()
        .map_err(|_| RepositoryError::Constraint("base_price exceeds BIGINT range".to_string()))
}

#[async_trait::async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, base_price, currency
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, base_price, currency
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip_all, fields(product_id = ?product.id), err)]
    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let base_price = price_column(&product)?;

        let row: ProductRow = match product.id {
            None => sqlx::query_as(
                r#"
                INSERT INTO products (name, description, base_price, currency)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, description, base_price, currency
                "#,
            )
            .bind(&product.name)
            .bind(&product.description)
            .bind(base_price)
            .bind(&product.pricing.currency)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_product", e))?,

            Some(id) => {
                let mut tx = self
                    .pool
                    .begin()
                    .await
                    .map_err(|e| map_sqlx_error("begin_transaction", e))?;

                let row: ProductRow = sqlx::query_as(
                    r#"
                    INSERT INTO products (id, name, description, base_price, currency)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (id) DO UPDATE
                    SET name = EXCLUDED.name,
                        description = EXCLUDED.description,
                        base_price = EXCLUDED.base_price,
                        currency = EXCLUDED.currency
                    RETURNING id, name, description, base_price, currency
                    "#,
                )
                .bind(id.get())
                .bind(&product.name)
                .bind(&product.description)
                .bind(base_price)
                .bind(&product.pricing.currency)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("upsert_product", e))?;

                sqlx::query(
                    r#"
                    SELECT setval(
                        pg_get_serial_sequence('products', 'id'),
                        GREATEST((SELECT MAX(id) FROM products), 1)
                    )
                    "#,
                )
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("advance_identity", e))?;

                tx.commit()
                    .await
                    .map_err(|e| map_sqlx_error("commit_transaction", e))?;

                row
            }
        };

        Product::try_from(row)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!("delete of unknown product ignored");
        }
        Ok(())
    }
}

/// Map SQLx errors to repository errors.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                // Class 23: integrity constraint violation
                Some(code) if code.starts_with("23") => RepositoryError::Constraint(msg),
                _ => RepositoryError::Storage(msg),
            }
        }
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Unavailable(format!("timed out acquiring connection in {}", operation))
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::Io(e) => {
            RepositoryError::Unavailable(format!("io error in {}: {}", operation, e))
        }
        sqlx::Error::Tls(e) => {
            RepositoryError::Unavailable(format!("tls error in {}: {}", operation, e))
        }
        err @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_)) => {
            RepositoryError::Decode(format!("{} in {}", err, operation))
        }
        _ => RepositoryError::Storage(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_unavailable() {
        assert!(matches!(
            map_sqlx_error("find_all", sqlx::Error::PoolTimedOut),
            RepositoryError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("find_all", sqlx::Error::PoolClosed),
            RepositoryError::Unavailable(_)
        ));
    }

    #[test]
    fn other_failures_are_storage() {
        assert!(matches!(
            map_sqlx_error("find_by_id", sqlx::Error::RowNotFound),
            RepositoryError::Storage(_)
        ));
    }

    #[test]
    fn negative_stored_price_fails_to_decode() {
        let row = ProductRow {
            id: 1,
            name: "Pen".to_string(),
            description: None,
            base_price: Some(-5),
            currency: None,
        };
        assert!(matches!(Product::try_from(row), Err(RepositoryError::Decode(_))));
    }

    #[test]
    fn row_maps_to_persistent_product() {
        let row = ProductRow {
            id: 3,
            name: "Ink".to_string(),
            description: Some("black".to_string()),
            base_price: Some(120),
            currency: Some("USD".to_string()),
        };
        let product = Product::try_from(row).unwrap();
        assert_eq!(product.id, Some(ProductId::new(3).unwrap()));
        assert_eq!(product.pricing.base_price, Some(120));
    }

    #[test]
    fn oversized_price_is_rejected_before_hitting_the_store() {
        let product = Product::new("Gold pen").with_pricing(PricingMetadata {
            base_price: Some(u64::MAX),
            currency: None,
        });
        assert!(matches!(price_column(&product), Err(RepositoryError::Constraint(_))));
    }
}
