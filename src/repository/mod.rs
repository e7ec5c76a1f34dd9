//! Store adapter for product records.
//!
//! Reader and writer traits describe the operations the service layer needs;
//! [`DieselRepository`] implements them on top of the SQLite connection pool.

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        product::{NewProduct, Product, UpdateProduct},
        query::ProductQuery,
        types::ProductId,
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod product;

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>>;
    /// Distinct, trimmed, non-empty brands in ascending order.
    fn list_brands(&self) -> RepositoryResult<Vec<String>>;
    fn count_products(&self) -> RepositoryResult<usize>;
}

pub trait ProductWriter {
    /// Inserts a product under a freshly assigned id.
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Inserts products under caller-provided ids, returning the inserted count.
    fn import_products(&self, products: &[(ProductId, NewProduct)]) -> RepositoryResult<usize>;
    fn update_product(&self, id: &ProductId, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}
