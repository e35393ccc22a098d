use std::collections::BTreeMap;
use std::sync::RwLock;

use catalog_core::Entity;
use catalog_products::{Product, ProductId, ProductRepository, RepositoryError, RepositoryResult};

#[derive(Debug)]
struct State {
    rows: BTreeMap<ProductId, Product>,
    /// `None` once `i64::MAX` has been handed out or stored.
    next_id: Option<i64>,
}

/// In-memory product store for tests/dev.
///
/// Identifiers are handed out from 1 upwards. Saving a product under an
/// explicit identifier moves the counter past it, so generated ids never
/// collide with caller-chosen ones. Once the identifier space is used up,
/// saving a transient product fails instead of reusing a key.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<State>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                rows: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.read().unwrap().rows.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("in-memory product store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        Ok(state.rows.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> RepositoryResult<Product> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;

        let id = match product.id() {
            Some(id) => id,
            None => {
                let raw = state.next_id.ok_or_else(|| {
                    RepositoryError::Storage("product identifier space exhausted".to_string())
                })?;
                let id = ProductId::new(raw).map_err(|e| RepositoryError::Storage(e.to_string()))?;
                product.assign_id(id);
                id
            }
        };
        state.next_id = match state.next_id {
            Some(next) if id.get() < next => Some(next),
            Some(_) => id.get().checked_add(1),
            None => None,
        };
        state.rows.insert(id, product.clone());

        Ok(product)
    }

    async fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        if state.rows.remove(&id).is_none() {
            tracing::debug!(product_id = %id, "delete of unknown product ignored");
        }
        Ok(())
    }
}
