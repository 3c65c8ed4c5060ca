/// Product endpoints
///
/// Owner-scoped CRUD over the caller's products. All endpoints require a
/// Bearer token; the caller identity comes from [`AuthContext`].
///
/// # Endpoints
///
/// - `POST   /products`     - Create a product owned by the caller
/// - `GET    /products`     - List the caller's products
/// - `PUT    /products/:id` - Update one of the caller's products
/// - `DELETE /products/:id` - Delete one of the caller's products
///
/// A product owned by another user answers exactly like a missing one
/// (`404 Product not found or unauthorized`).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use catalog_shared::{
    auth::middleware::AuthContext,
    models::product::{Product, ProductInput},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response carrying a confirmation message and the affected product
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub message: String,
    pub product: Product,
}

/// Response carrying only a confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Coerces a path segment into a product id
///
/// Lenient like a classic `parseInt(s, 10)`: leading whitespace is skipped,
/// an optional sign is honoured and parsing stops at the first non-digit.
/// Returns `None` when no digits lead the segment or the value overflows;
/// such an id cannot name any product.
pub fn coerce_product_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let value = unsigned[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Parses a request body without rejecting it
///
/// A missing, empty or non-JSON body is read as `{}`; the content type is not
/// consulted.
fn read_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Create product
///
/// ```text
/// POST /products
/// Authorization: Bearer <token>
///
/// {"name": "Widget", "description": "", "price": 9.99, "stock": 5}
/// ```
///
/// # Response
///
/// `201 Created` with `{"message": "Product created", "product": {...}}`.
///
/// # Errors
///
/// - `500 Internal Server Error`: the store rejected the row (missing name or
///   price, or a value that does not cast to its column type)
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let failed = ApiError::persistence("Error creating product");
    let input = match ProductInput::from_json(&read_body(&body)) {
        Ok(input) => input,
        Err(e) => return Err(failed(e)),
    };

    let product = state
        .store
        .create(auth.user_id, input)
        .await
        .map_err(failed)?;

    tracing::info!(user_id = auth.user_id, product_id = product.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product created".to_string(),
            product,
        }),
    ))
}

/// List products
///
/// Returns every product owned by the caller as a bare JSON array, in store
/// order. An empty array is a normal answer.
pub async fn list_products(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = state
        .store
        .list_owned(auth.user_id)
        .await
        .map_err(ApiError::persistence("Error fetching products"))?;

    tracing::debug!(user_id = auth.user_id, count = products.len(), "Listed products");

    Ok(Json(products))
}

/// Update product
///
/// Fields present in the body overwrite the stored values; omitted fields
/// are left unchanged, so an empty body leaves the product as it was.
///
/// # Errors
///
/// - `404 Not Found`: no product with this id is owned by the caller
/// - `500 Internal Server Error`: store failure or a value that does not
///   cast to its column type
pub async fn update_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ProductResponse>> {
    let id = coerce_product_id(&raw_id).ok_or(ApiError::NotFoundOrUnauthorized)?;

    let failed = ApiError::persistence("Error updating product");
    let input = match ProductInput::from_json(&read_body(&body)) {
        Ok(input) => input,
        Err(e) => return Err(failed(e)),
    };

    let product = state
        .store
        .update_owned(id, auth.user_id, input)
        .await
        .map_err(failed)?
        .ok_or(ApiError::NotFoundOrUnauthorized)?;

    tracing::info!(user_id = auth.user_id, product_id = id, "Product updated");

    Ok(Json(ProductResponse {
        message: "Product updated".to_string(),
        product,
    }))
}

/// Delete product
///
/// Hard delete. A second delete of the same id answers 404.
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = coerce_product_id(&raw_id).ok_or(ApiError::NotFoundOrUnauthorized)?;

    let deleted = state
        .store
        .delete_owned(id, auth.user_id)
        .await
        .map_err(ApiError::persistence("Error deleting product"))?;

    if !deleted {
        return Err(ApiError::NotFoundOrUnauthorized);
    }

    tracing::info!(user_id = auth.user_id, product_id = id, "Product deleted");

    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_digits() {
        assert_eq!(coerce_product_id("42"), Some(42));
        assert_eq!(coerce_product_id("  7"), Some(7));
        assert_eq!(coerce_product_id("+3"), Some(3));
        assert_eq!(coerce_product_id("-3"), Some(-3));
    }

    #[test]
    fn test_coerce_ignores_trailing_garbage() {
        assert_eq!(coerce_product_id("12abc"), Some(12));
        assert_eq!(coerce_product_id("5.9"), Some(5));
    }

    #[test]
    fn test_read_body_falls_back_to_empty_object() {
        assert_eq!(read_body(&Bytes::new()), serde_json::json!({}));
        assert_eq!(read_body(&Bytes::from_static(b"name=Widget")), serde_json::json!({}));
        assert_eq!(
            read_body(&Bytes::from_static(br#"{"name":"Widget"}"#)),
            serde_json::json!({"name": "Widget"})
        );
    }

    #[test]
    fn test_coerce_rejects_non_numeric() {
        assert_eq!(coerce_product_id("abc"), None);
        assert_eq!(coerce_product_id(""), None);
        assert_eq!(coerce_product_id("-"), None);
        assert_eq!(coerce_product_id("99999999999999999999"), None);
    }
}
