//! Catalog API HTTP client implementation

use async_trait::async_trait;
use cars_core::{
    Car, CarId, Category, CategoryId, FetchError, FetchResult, Manufacturer, ManufacturerId,
    Resource, ResourceClient, ResourceDescriptor,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Error body returned by the catalog API on 404 (`{"message": "..."}`)
#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Catalog API client.
///
/// Every fetch issues one `GET`, requires status 200 and decodes the body
/// into the requested type. The body is read to the end on every path, so
/// the connection goes back to the pool whether the fetch succeeded or not.
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    client: Client,
    base_url: Url,
}

impl HttpResourceClient {
    /// Create a client with default timeouts
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the catalog API (e.g., "http://localhost:3000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(&ClientConfig::new(base_url))
    }

    /// Create a client from an explicit configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::UnsupportedBaseUrl(config.base_url.clone()));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL
    pub fn url_for(&self, path: &str) -> FetchResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::transport(path, format!("invalid request URL: {}", e)))
    }

    // =========================================================================
    // Generic fetch
    // =========================================================================

    /// Fetch `path` and decode the body as `T`
    #[instrument(skip(self))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let (url, body) = self.get_body(path).await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::decode(url.as_str(), e.to_string()))
    }

    /// Fetch the resource named by `descriptor`
    #[instrument(skip(self, descriptor), fields(resource = %descriptor))]
    pub async fn fetch_resource(&self, descriptor: &ResourceDescriptor) -> FetchResult<Resource> {
        let (url, body) = self.get_body(&descriptor.path()).await?;
        let resource = Resource::decode(descriptor.kind(), &body)
            .map_err(|e| FetchError::decode(url.as_str(), e.to_string()))?;
        debug!(%url, bytes = body.len(), "Decoded resource");
        Ok(resource)
    }

    // =========================================================================
    // Cars
    // =========================================================================

    /// List all cars
    pub async fn list_cars(&self) -> FetchResult<Vec<Car>> {
        self.fetch_json(&ResourceDescriptor::cars().path()).await
    }

    /// Get one car
    pub async fn get_car(&self, id: CarId) -> FetchResult<Car> {
        self.fetch_json(&ResourceDescriptor::car(id).path()).await
    }

    // =========================================================================
    // Manufacturers
    // =========================================================================

    /// List all manufacturers
    pub async fn list_manufacturers(&self) -> FetchResult<Vec<Manufacturer>> {
        self.fetch_json(&ResourceDescriptor::manufacturers().path())
            .await
    }

    /// Get one manufacturer
    pub async fn get_manufacturer(&self, id: ManufacturerId) -> FetchResult<Manufacturer> {
        self.fetch_json(&ResourceDescriptor::manufacturer(id).path())
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories
    pub async fn list_categories(&self) -> FetchResult<Vec<Category>> {
        self.fetch_json(&ResourceDescriptor::categories().path())
            .await
    }

    /// Get one category
    pub async fn get_category(&self, id: CategoryId) -> FetchResult<Category> {
        self.fetch_json(&ResourceDescriptor::category(id).path())
            .await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Send a GET and return the full body of a 200 response
    async fn get_body(&self, path: &str) -> FetchResult<(Url, Vec<u8>)> {
        let url = self.url_for(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(self.extract_error(&url, response, status).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&url, e))?;

        Ok((url, body.to_vec()))
    }

    /// Drain a non-200 response and turn it into a status error
    async fn extract_error(
        &self,
        url: &Url,
        response: reqwest::Response,
        status: StatusCode,
    ) -> FetchError {
        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorResponse>(&body)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
            });

        FetchError::status(url.as_str(), status.as_u16(), message)
    }
}

/// Map a reqwest failure before or while reading the body
fn transport_error(url: &Url, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        FetchError::transport(url.as_str(), message)
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn fetch(&self, descriptor: &ResourceDescriptor) -> FetchResult<Resource> {
        self.fetch_resource(descriptor).await
    }
}
