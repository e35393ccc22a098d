use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_products::RepositoryError;

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    let (status, code) = match &err {
        RepositoryError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
        RepositoryError::Constraint(_) => (StatusCode::CONFLICT, "constraint_violation"),
        RepositoryError::Decode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "decode_error"),
        RepositoryError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "product store failure");
    }
    json_error(status, code, err.to_string())
}

pub fn invalid_id(err: DomainError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string())
}

pub fn invalid_body(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
