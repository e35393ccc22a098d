use serde::{Deserialize, Serialize};

use catalog_products::{PricingMetadata, Product, ProductId};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products` and `PUT /products/:id`.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: Option<PricingMetadata>,
}

impl From<ProductRequest> for Product {
    fn from(body: ProductRequest) -> Self {
        Product {
            id: body.id,
            name: body.name,
            description: body.description,
            pricing: body.pricing.unwrap_or_default(),
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_body_becomes_transient_product() {
        let body: ProductRequest = serde_json::from_str(r#"{"name":"Pen"}"#).unwrap();
        assert_eq!(Product::from(body), Product::new("Pen"));
    }

    #[test]
    fn body_id_is_kept() {
        let body: ProductRequest =
            serde_json::from_str(r#"{"id":5,"name":"Pen","pricing":{"base_price":99,"currency":"USD"}}"#)
                .unwrap();
        let product = Product::from(body);
        assert_eq!(product.id, Some(ProductId::new(5).unwrap()));
        assert_eq!(product.pricing.base_price, Some(99));
    }
}
