use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use catalog_products::{Product, ProductId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse().map_err(errors::invalid_id)
}

pub async fn list_products(Extension(services): Extension<AppServices>) -> axum::response::Response {
    match services.products.get_all_products().await {
        Ok(items) => (StatusCode::OK, Json(dto::ProductList { items })).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.products.get_product_by_id(id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<AppServices>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_body(rejection),
    };

    match services.products.save_product(Product::from(body)).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_body(rejection),
    };

    // path id wins over any id in the body
    let product = Product::from(body).with_id(id);
    match services.products.save_product(product).await {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.products.delete_by_id(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}
