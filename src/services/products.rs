//! Catalog operations backing the `/api/products` endpoints.

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::query::ProductQuery;
use crate::domain::types::ProductId;
use crate::dto::products::{ListParams, SearchParams};
use crate::forms::products::{CreateProductForm, UpdateProductForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Path segments that cannot name a product are reported as not found.
fn parse_id(raw: &str) -> ServiceResult<ProductId> {
    ProductId::new(raw).map_err(|_| ServiceError::NotFound)
}

/// Returns every product in the requested order.
pub fn list_products<R>(repo: &R, params: ListParams) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductQuery::from(params);
    repo.list_products(&query).map_err(|err| {
        log::error!("Failed to list products: {err}");
        ServiceError::from(err)
    })
}

/// Returns the products matching the search filters.
pub fn search_products<R>(repo: &R, params: SearchParams) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductQuery::from(params);
    log::debug!("Searching products with {query:?}");
    repo.list_products(&query).map_err(|err| {
        log::error!("Failed to search products: {err}");
        ServiceError::from(err)
    })
}

/// Fetches one product by its identifier.
pub fn get_product<R>(repo: &R, raw_id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let id = parse_id(raw_id)?;
    repo.get_product_by_id(&id)
        .map_err(|err| {
            log::error!("Failed to get product {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Validates the payload and persists a new product under a fresh id.
pub fn create_product<R>(repo: &R, form: CreateProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = NewProduct::try_from(form).map_err(|err| {
        log::warn!("Rejected product payload: {err}");
        ServiceError::from(err)
    })?;

    let product = repo.create_product(&new_product).map_err(|err| {
        log::error!("Failed to create product: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Created product {}", product.id);
    Ok(product)
}

/// Applies the truthy fields of the payload to an existing product.
pub fn update_product<R>(repo: &R, raw_id: &str, form: UpdateProductForm) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let id = parse_id(raw_id)?;
    let existing = repo.get_product_by_id(&id).map_err(|err| {
        log::error!("Failed to get product {id}: {err}");
        ServiceError::from(err)
    })?;
    if existing.is_none() {
        return Err(ServiceError::NotFound);
    }

    let updates = UpdateProduct::try_from(form).map_err(|err| {
        log::warn!("Rejected update for product {id}: {err}");
        ServiceError::from(err)
    })?;

    repo.update_product(&id, &updates).map_err(|err| {
        log::error!("Failed to update product {id}: {err}");
        ServiceError::from(err)
    })
}

/// Removes a product permanently.
pub fn delete_product<R>(repo: &R, raw_id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let id = parse_id(raw_id)?;
    repo.delete_product(&id).map_err(|err| {
        log::error!("Failed to delete product {id}: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Deleted product {id}");
    Ok(())
}

/// Lists the distinct non-empty brands across the catalog.
pub fn list_brands<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: ProductReader + ?Sized,
{
    repo.list_brands().map_err(|err| {
        log::error!("Failed to list brands: {err}");
        ServiceError::from(err)
    })
}
