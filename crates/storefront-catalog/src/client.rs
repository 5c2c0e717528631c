//! # Catalog Client
//!
//! ## Remote Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET  {base_url}/products                                              │
//! │       200 → [ {id, name, price, description, image}, ... ]             │
//! │                                                                         │
//! │  POST {base_url}/products                                              │
//! │       body  {name, price, description, image}                          │
//! │       2xx → {id, name, price, description, image}                      │
//! │                                                                         │
//! │  Any other status → CatalogError::Status { status, body }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries and no caching; a failed call fails once.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use storefront_core::validation::validate_new_product;
use storefront_core::{NewProduct, Product};
use tracing::{debug, info};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

/// Access to the product catalog.
///
/// `HttpCatalogClient` is the production implementation; tests provide
/// their own to drive fallback paths.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches the full product list.
    async fn get_products(&self) -> CatalogResult<Vec<Product>>;

    /// Creates a product and returns it with its server-assigned id.
    async fn add_product(&self, product: NewProduct) -> CatalogResult<Product>;
}

/// reqwest-backed catalog client.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    products_url: Url,
}

impl HttpCatalogClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client fails
    /// to build.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        let products_url = config.products_url()?;
        info!(url = %products_url, "Catalog client ready");

        Ok(Self {
            client,
            products_url,
        })
    }

    /// The products collection URL requests go to.
    pub fn products_url(&self) -> &Url {
        &self.products_url
    }

    /// Turns a response into `T`, or a `Status`/`Decode` error.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> CatalogResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_products(&self) -> CatalogResult<Vec<Product>> {
        debug!(url = %self.products_url, "Fetching products");

        let response = self.client.get(self.products_url.clone()).send().await?;
        let products: Vec<Product> = Self::read_json(response).await?;

        debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    async fn add_product(&self, product: NewProduct) -> CatalogResult<Product> {
        validate_new_product(&product)?;

        let response = self
            .client
            .post(self.products_url.clone())
            .json(&product)
            .send()
            .await?;
        let created: Product = Self::read_json(response).await?;

        info!(id = created.id, name = %created.name, "Product created");
        Ok(created)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
