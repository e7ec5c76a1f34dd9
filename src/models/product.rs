use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{Price, ProductId, ProductTitle, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub brand: String,
    pub price: f64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub brand: &'a str,
    pub price: f64,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
/// Mutable columns written back on update; `id` and `created_at` never change.
pub struct ProductChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub brand: &'a str,
    pub price: f64,
}

impl<'a> NewProduct<'a> {
    pub fn from_domain(
        id: &'a ProductId,
        product: &'a DomainNewProduct,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.as_str(),
            title: product.title.as_str(),
            description: product.description.as_str(),
            brand: product.brand.as_str(),
            price: product.price.get(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainProduct> for ProductChanges<'a> {
    fn from(product: &'a DomainProduct) -> Self {
        Self {
            title: product.title.as_str(),
            description: product.description.as_str(),
            brand: product.brand.as_str(),
            price: product.price.get(),
        }
    }
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            title: ProductTitle::new(product.title)?,
            description: product.description,
            brand: product.brand,
            price: Price::new(product.price)?,
            created_at: product.created_at.and_utc(),
        })
    }
}
