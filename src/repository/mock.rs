//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::query::ProductQuery;
use crate::domain::types::ProductId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ProductReader, ProductWriter};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>>;
        fn list_brands(&self) -> RepositoryResult<Vec<String>>;
        fn count_products(&self) -> RepositoryResult<usize>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn import_products(
            &self,
            products: &[(ProductId, NewProduct)],
        ) -> RepositoryResult<usize>;
        fn update_product(
            &self,
            id: &ProductId,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
    }
}
