/// HTTP client for the product service
///
/// The console only needs one call: list the caller's products. The
/// [`ProductApi`] trait is the seam the console is written against so it can
/// be driven by a scripted double in tests.

use async_trait::async_trait;
use catalog_shared::models::product::Product;
use serde::Deserialize;

/// Client error types
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status
    #[error("Request failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,

        /// `message` field of the JSON error body, when present
        message: Option<String>,
    },

    /// The request never got an answer
    #[error("Request failed: {0}")]
    Transport(String),

    /// The answer could not be read as a product list
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status of the failure, if the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message supplied by the service
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Product list as returned by the service
///
/// Accepts both a bare array and an object wrapping it under `products`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductListBody {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl ProductListBody {
    pub fn into_products(self) -> Vec<Product> {
        match self {
            ProductListBody::Bare(products) | ProductListBody::Wrapped { products } => products,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Operations the console needs from the product service
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Lists the products owned by the bearer of `token`
    async fn list_products(&self, token: &str) -> ClientResult<Vec<Product>>;
}

/// `reqwest`-backed product service client
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProductApi {
    /// Creates a client for the service at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self, token: &str) -> ClientResult<Vec<Product>> {
        let response = self
            .http
            .get(self.products_url())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            tracing::debug!(status = status.as_u16(), ?message, "Product list request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<ProductListBody>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(body.into_products())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Widget",
            "description": null,
            "price": 9.99,
            "stock": 5,
            "user_id": 1,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_bare_array_body() {
        let body: ProductListBody =
            serde_json::from_value(json!([product_json(1), product_json(2)])).unwrap();
        let products = body.into_products();

        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, 2);
    }

    #[test]
    fn test_wrapped_body() {
        let body: ProductListBody =
            serde_json::from_value(json!({ "products": [product_json(3)] })).unwrap();

        assert_eq!(body.into_products()[0].id, 3);
    }

    #[test]
    fn test_empty_bodies() {
        let bare: ProductListBody = serde_json::from_value(json!([])).unwrap();
        let wrapped: ProductListBody = serde_json::from_value(json!({ "products": [] })).unwrap();

        assert!(bare.into_products().is_empty());
        assert!(wrapped.into_products().is_empty());
    }

    #[test]
    fn test_error_accessors() {
        let err = ClientError::Status {
            status: 403,
            message: Some("Invalid or expired token".to_string()),
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.server_message(), Some("Invalid or expired token"));

        let err = ClientError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpProductApi::new("http://localhost:5000/");
        assert_eq!(api.products_url(), "http://localhost:5000/products");
    }
}
