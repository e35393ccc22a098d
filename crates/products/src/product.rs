use serde::{Deserialize, Serialize};

use catalog_core::Entity;

catalog_core::numeric_id!(
    /// Product identifier (store-assigned, positive).
    ProductId,
    "ProductId"
);

/// Optional pricing metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingMetadata {
    pub base_price: Option<u64>, // Price in smallest currency unit (e.g., cents)
    pub currency: Option<String>, // ISO currency code (e.g., "USD", "EUR")
}

/// Catalog product.
///
/// `id` is `None` until the product has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: PricingMetadata,
}

impl Product {
    /// A transient product with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            pricing: PricingMetadata::default(),
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_pricing(mut self, pricing: PricingMetadata) -> Self {
        self.pricing = pricing;
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_is_transient() {
        let product = Product::new("Pen");
        assert!(product.is_transient());
        assert_eq!(product.pricing, PricingMetadata::default());
    }

    #[test]
    fn assign_id_makes_product_persistent() {
        let mut product = Product::new("Pen");
        product.assign_id(ProductId::new(3).unwrap());
        assert_eq!(Entity::id(&product), Some(ProductId::new(3).unwrap()));
        assert!(!product.is_transient());
    }

    #[test]
    fn json_shape_uses_bare_numeric_id() {
        let product = Product::new("Pen")
            .with_id(ProductId::new(1).unwrap())
            .with_pricing(PricingMetadata {
                base_price: Some(150),
                currency: Some("USD".to_string()),
            });

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Pen");
        assert!(json["description"].is_null());
        assert_eq!(json["pricing"]["base_price"], 150);
    }

    #[test]
    fn optional_fields_default_when_missing_from_json() {
        let product: Product = serde_json::from_str(r#"{"name":"Pen"}"#).unwrap();
        assert_eq!(product, Product::new("Pen"));
    }
}
