//! Product service: the façade the HTTP layer calls.
//!
//! Every operation is a single forward to the repository. Results and errors
//! come back untouched; the service keeps no state of its own.

use std::sync::Arc;

use tracing::instrument;

use crate::product::{Product, ProductId};
use crate::repository::{ProductRepository, RepositoryResult};

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// All products known to the repository (possibly empty).
    #[instrument(level = "debug", skip_all)]
    pub async fn get_all_products(&self) -> RepositoryResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Absence is `Ok(None)`, never an error.
    #[instrument(level = "debug", skip_all, fields(product_id = %id))]
    pub async fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    /// Insert when `product.id` is `None`, otherwise upsert under that id.
    #[instrument(level = "debug", skip_all, fields(product_id = ?product.id))]
    pub async fn save_product(&self, product: Product) -> RepositoryResult<Product> {
        self.repository.save(product).await
    }

    #[instrument(level = "debug", skip_all, fields(product_id = %id))]
    pub async fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
        self.repository.delete_by_id(id).await
    }
}

impl core::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::repository::RepositoryError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        FindAll,
        FindById(ProductId),
        Save(Product),
        DeleteById(ProductId),
    }

    /// Records every call and answers from canned responses.
    struct RecordingRepository {
        calls: Mutex<Vec<Call>>,
        stored: Vec<Product>,
        failure: Option<RepositoryError>,
    }

    impl RecordingRepository {
        fn with_products(stored: Vec<Product>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                stored,
                failure: None,
            }
        }

        fn failing(err: RepositoryError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                stored: Vec::new(),
                failure: Some(err),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> RepositoryResult<()> {
            self.calls.lock().unwrap().push(call);
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ProductRepository for RecordingRepository {
        async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
            self.record(Call::FindAll)?;
            Ok(self.stored.clone())
        }

        async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
            self.record(Call::FindById(id))?;
            Ok(self.stored.iter().find(|p| p.id == Some(id)).cloned())
        }

        async fn save(&self, product: Product) -> RepositoryResult<Product> {
            self.record(Call::Save(product.clone()))?;
            Ok(match product.id {
                Some(_) => product,
                None => product.with_id(pid(99)),
            })
        }

        async fn delete_by_id(&self, id: ProductId) -> RepositoryResult<()> {
            self.record(Call::DeleteById(id))
        }
    }

    fn pid(raw: i64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn service_over(repo: &Arc<RecordingRepository>) -> ProductService {
        ProductService::new(repo.clone())
    }

    #[tokio::test]
    async fn get_all_forwards_once_and_returns_repository_order() {
        let stored = vec![
            Product::new("Pen").with_id(pid(1)),
            Product::new("Ink").with_id(pid(2)),
        ];
        let repo = Arc::new(RecordingRepository::with_products(stored.clone()));
        let service = service_over(&repo);

        let products = service.get_all_products().await.unwrap();

        assert_eq!(products, stored);
        assert_eq!(repo.calls(), vec![Call::FindAll]);
    }

    #[tokio::test]
    async fn get_all_on_empty_store_is_empty_not_error() {
        let repo = Arc::new(RecordingRepository::with_products(Vec::new()));
        let products = service_over(&repo).get_all_products().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn missing_product_is_none() {
        let repo = Arc::new(RecordingRepository::with_products(Vec::new()));
        let found = service_over(&repo).get_product_by_id(pid(7)).await.unwrap();

        assert_eq!(found, None);
        assert_eq!(repo.calls(), vec![Call::FindById(pid(7))]);
    }

    #[tokio::test]
    async fn save_passes_product_through_unchanged() {
        let repo = Arc::new(RecordingRepository::with_products(Vec::new()));
        let service = service_over(&repo);
        let product = Product::new("Pen").with_description("blue");

        let saved = service.save_product(product.clone()).await.unwrap();

        assert_eq!(saved, product.clone().with_id(pid(99)));
        assert_eq!(repo.calls(), vec![Call::Save(product)]);
    }

    #[tokio::test]
    async fn delete_forwards_once() {
        let repo = Arc::new(RecordingRepository::with_products(Vec::new()));
        service_over(&repo).delete_by_id(pid(4)).await.unwrap();
        assert_eq!(repo.calls(), vec![Call::DeleteById(pid(4))]);
    }

    #[tokio::test]
    async fn repository_errors_propagate_unchanged() {
        let err = RepositoryError::Unavailable("connection refused".to_string());
        let repo = Arc::new(RecordingRepository::failing(err.clone()));
        let service = service_over(&repo);

        assert_eq!(service.get_all_products().await.unwrap_err(), err);
        assert_eq!(service.get_product_by_id(pid(1)).await.unwrap_err(), err);
        assert_eq!(service.save_product(Product::new("Pen")).await.unwrap_err(), err);
        assert_eq!(service.delete_by_id(pid(1)).await.unwrap_err(), err);
        // one attempt per call, no retries
        assert_eq!(repo.calls().len(), 4);
    }
}
