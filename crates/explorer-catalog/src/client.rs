//! # Catalog Client
//!
//! The three read operations against the remote catalog.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  list_products()     GET {base}/products              → [Product]      │
//! │  get_product(id)     GET {base}/products/{id}         → Product        │
//! │  list_categories()   GET {base}/products/categories   → [String]       │
//! │                                                                         │
//! │  2xx + matching JSON ──► Ok                                            │
//! │  anything else       ──► FetchError ("Failed to fetch ...")            │
//! │                                                                         │
//! │  No retries. No timeout unless configured.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use explorer_core::{Product, ProductId};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{ConfigError, FetchError, FetchResult, Resource};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("product-explorer/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Trait
// =============================================================================

/// Read access to a product catalog.
///
/// The HTTP client, the response cache and test fakes all implement this.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Every product, in catalog order.
    async fn list_products(&self) -> FetchResult<Vec<Product>>;

    /// One product. An unknown id is an ordinary `FetchError`.
    async fn get_product(&self, id: ProductId) -> FetchResult<Product>;

    /// Category names, in catalog order.
    async fn list_categories(&self) -> FetchResult<Vec<String>>;
}

impl<T: CatalogApi> CatalogApi for Arc<T> {
    async fn list_products(&self) -> FetchResult<Vec<Product>> {
        self.as_ref().list_products().await
    }

    async fn get_product(&self, id: ProductId) -> FetchResult<Product> {
        self.as_ref().get_product(id).await
    }

    async fn list_categories(&self) -> FetchResult<Vec<String>> {
        self.as_ref().list_categories().await
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// `CatalogApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Builds a client from validated settings.
    pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(HttpCatalogClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{segments...}`, keeping any path prefix of the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: Resource, url: Url) -> FetchResult<T> {
        debug!(%url, %resource, "Fetching from catalog");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::transport(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Catalog returned an error status");
            return Err(FetchError::status(resource, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(resource, e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::decode(resource, e))
    }
}

impl CatalogApi for HttpCatalogClient {
    async fn list_products(&self) -> FetchResult<Vec<Product>> {
        self.fetch(Resource::Products, self.endpoint(&["products"]))
            .await
    }

    async fn get_product(&self, id: ProductId) -> FetchResult<Product> {
        let id = id.to_string();
        self.fetch(Resource::Product, self.endpoint(&["products", &id]))
            .await
    }

    async fn list_categories(&self) -> FetchResult<Vec<String>> {
        self.fetch(
            Resource::Categories,
            self.endpoint(&["products", "categories"]),
        )
        .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    fn client_for(server: &MockServer) -> HttpCatalogClient {
        HttpCatalogClient::new(&CatalogConfig::new(server.base_url())).unwrap()
    }

    fn product_json(id: u64, title: &str, price: f64) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "price": price,
            "description": "desc",
            "category": "electronics",
            "image": "https://example.com/img.png",
            "rating": { "rate": 4.1, "count": 259 }
        })
    }

    #[tokio::test]
    async fn test_list_products() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products");
            then.status(200).json_body(json!([
                product_json(1, "SSD", 109.0),
                product_json(2, "Monitor", 999.99),
            ]));
        });

        let products = client_for(&server).list_products().await.unwrap();

        mock.assert();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].price.value(), 999.99);
    }

    #[tokio::test]
    async fn test_get_product() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/7");
            then.status(200).json_body(product_json(7, "Ring", 9.99));
        });

        let product = client_for(&server).get_product(7).await.unwrap();

        mock.assert();
        assert_eq!(product.id, 7);
        assert_eq!(product.title, "Ring");
    }

    #[tokio::test]
    async fn test_list_categories() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products/categories");
            then.status(200)
                .json_body(json!(["electronics", "jewelery", "men's clothing"]));
        });

        let categories = client_for(&server).list_categories().await.unwrap();

        mock.assert();
        assert_eq!(categories, vec!["electronics", "jewelery", "men's clothing"]);
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_error() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products");
            then.status(500).body("boom");
        });

        let err = client_for(&server).list_products().await.unwrap_err();

        mock.assert();
        assert_eq!(err.to_string(), "Failed to fetch products");
        assert_eq!(err.http_status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_not_found_is_undifferentiated() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/999");
            then.status(404);
        });

        let err = client_for(&server).get_product(999).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch product");
    }

    #[tokio::test]
    async fn test_malformed_body_is_fetch_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/categories");
            then.status(200).json_body(json!({ "categories": [] }));
        });

        let err = client_for(&server).list_categories().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch categories");
        assert_eq!(err.http_status(), None);
    }

    #[tokio::test]
    async fn test_empty_body_is_fetch_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/products/21");
            then.status(200).body("");
        });

        let err = client_for(&server).get_product(21).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch product");
    }

    #[tokio::test]
    async fn test_transport_failure_is_fetch_error() {
        // Nothing listens on port 9 (discard) on a test machine.
        let client = HttpCatalogClient::new(
            &CatalogConfig::new("http://127.0.0.1:9").request_timeout_secs(2),
        )
        .unwrap();

        let err = client.list_products().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch products");
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/products/categories");
            then.status(200).json_body(json!([]));
        });

        let config = CatalogConfig::new(format!("{}/api/v1/", server.base_url()));
        let client = HttpCatalogClient::new(&config).unwrap();

        assert!(client.list_categories().await.unwrap().is_empty());
        mock.assert();
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(HttpCatalogClient::new(&CatalogConfig::new("nope")).is_err());
    }
}
