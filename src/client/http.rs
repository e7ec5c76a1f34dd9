//! Blocking HTTP implementation of [`CatalogApi`].

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::client::{ApiError, ApiResult, CatalogApi};
use crate::domain::product::Product;
use crate::domain::query::SortOrder;
use crate::dto::api::MessageResponse;
use crate::dto::products::{ListParams, SearchParams};
use crate::forms::products::{CreateProductForm, UpdateProductForm};

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Talks to a running catalog server.
pub struct HttpCatalogApi {
    client: Client,
    endpoint: String,
}

impl HttpCatalogApi {
    /// Creates an adapter for the server at `base_url` with no request timeout.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/products", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn product_url(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    fn send<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            // Error bodies are `{message}`; fall back to the reason phrase.
            let message = response
                .json::<MessageResponse>()
                .map(|body| body.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>()?)
    }
}

impl CatalogApi for HttpCatalogApi {
    fn list_products(&self, sort: SortOrder) -> ApiResult<Vec<Product>> {
        Self::send(
            self.client
                .get(&self.endpoint)
                .query(&ListParams::sorted(sort)),
        )
    }

    fn search_products(&self, params: &SearchParams) -> ApiResult<Vec<Product>> {
        Self::send(
            self.client
                .get(format!("{}/search/query", self.endpoint))
                .query(params),
        )
    }

    fn list_brands(&self) -> ApiResult<Vec<String>> {
        Self::send(self.client.get(format!("{}/brands/all", self.endpoint)))
    }

    fn create_product(&self, form: &CreateProductForm) -> ApiResult<Product> {
        Self::send(self.client.post(&self.endpoint).json(form))
    }

    fn update_product(&self, id: &str, form: &UpdateProductForm) -> ApiResult<Product> {
        Self::send(self.client.put(self.product_url(id)).json(form))
    }

    fn delete_product(&self, id: &str) -> ApiResult<()> {
        let _: MessageResponse = Self::send(self.client.delete(self.product_url(id)))?;
        Ok(())
    }
}
