use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Price, ProductId, ProductTitle};

/// Catalog entry as persisted by the store and returned by the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: ProductTitle,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a product; the id is assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub title: ProductTitle,
    pub description: String,
    pub brand: String,
    pub price: Price,
}

impl NewProduct {
    #[must_use]
    pub fn new(title: ProductTitle, description: String, brand: String, price: Price) -> Self {
        Self {
            title,
            description: description.trim().to_string(),
            brand: brand.trim().to_string(),
            price,
        }
    }
}

/// Partial update; `None` fields keep the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateProduct {
    pub title: Option<ProductTitle>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<Price>,
}

impl UpdateProduct {
    /// Returns `true` when applying the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.brand.is_none()
            && self.price.is_none()
    }

    /// Applies the present fields onto an existing product.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(brand) = &self.brand {
            product.brand = brand.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}
