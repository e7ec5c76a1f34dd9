//! Client side of the catalog: state store, view model and the controller
//! that keeps both in sync with the REST API.

use thiserror::Error;

use crate::domain::product::Product;
use crate::domain::query::SortOrder;
use crate::dto::products::SearchParams;
use crate::forms::products::{CreateProductForm, UpdateProductForm};

#[cfg(feature = "client")]
pub mod http;
pub mod state;
pub mod sync;
pub mod view;

/// Failure of a call to the catalog API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations the client performs against `/api/products`.
pub trait CatalogApi {
    fn list_products(&self, sort: SortOrder) -> ApiResult<Vec<Product>>;
    fn search_products(&self, params: &SearchParams) -> ApiResult<Vec<Product>>;
    fn list_brands(&self) -> ApiResult<Vec<String>>;
    fn create_product(&self, form: &CreateProductForm) -> ApiResult<Product>;
    fn update_product(&self, id: &str, form: &UpdateProductForm) -> ApiResult<Product>;
    fn delete_product(&self, id: &str) -> ApiResult<()>;
}
