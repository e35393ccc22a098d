use catalog_infra::AppConfig;
use catalog_products::ProductService;

/// Services shared by all handlers. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub products: ProductService,
}

impl AppServices {
    pub fn new(products: ProductService) -> Self {
        Self { products }
    }
}

/// Wire services for the configured product store.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let repository = catalog_infra::build_repository(config).await?;
    Ok(AppServices::new(ProductService::new(repository)))
}
