//! Repository boundary for products.
//!
//! Implementations own identity assignment and persistence semantics; callers
//! see either a product, an absence, or a [`RepositoryError`].

use std::sync::Arc;

use thiserror::Error;

use crate::product::{Product, ProductId};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures reported by a product store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store could not be reached (pool closed, IO failure, timeout).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the write (unique/foreign key/check violation).
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// A stored record could not be mapped back to a [`Product`].
    #[error("failed to decode stored product: {0}")]
    Decode(String),

    /// Any other store failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence capability set consumed by [`crate::ProductService`].
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    /// All stored products, in ascending identifier order.
    async fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// The product with `id`, or `None` when nothing is stored under it.
    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;

    /// Insert a transient product (assigning a fresh id) or overwrite the
    /// record stored under its id. Returns the stored entity.
    async fn save(&self, product: Product) -> RepositoryResult<Product>;

    /// Remove the product with `id`. Removing a missing id is a no-op.
    async fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()>;
}

#[async_trait::async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        (**self).save(product).await
    }

    async fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
        (**self).delete_by_id(id).await
    }
}
