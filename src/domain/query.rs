//! Store-agnostic filter and sort options for product lookups.
//!
//! A [`ProductQuery`] is built from already-parsed search input and handed to
//! the repository, which translates it into its own query language. The same
//! query can be evaluated in memory through [`ProductQuery::apply`].

use std::cmp::Ordering;

use crate::domain::product::Product;

/// Ordering requested by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by price.
    PriceAsc,
    /// Descending by price.
    PriceDesc,
    /// Ascending by the string value of the id.
    #[default]
    Id,
}

impl SortOrder {
    /// Parses a raw `sort` parameter. Unknown or missing values fall back to
    /// [`SortOrder::Id`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            _ => Self::Id,
        }
    }

    /// Wire value of the sort key, `None` for the default order.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::PriceAsc => Some("price_asc"),
            Self::PriceDesc => Some("price_desc"),
            Self::Id => None,
        }
    }
}

/// Filters and ordering applied when listing products.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductQuery {
    /// Matched against title or description, case-insensitively.
    pub term: Option<String>,
    /// Matched against brand, case-insensitively.
    pub brand: Option<String>,
    /// Inclusive lower bound on price.
    pub min_price: Option<f64>,
    /// Inclusive upper bound on price.
    pub max_price: Option<f64>,
    pub sort: SortOrder,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into()).filter(|b: &String| !b.is_empty());
        self
    }

    pub fn min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price).filter(|p| p.is_finite());
        self
    }

    pub fn max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price).filter(|p| p.is_finite());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Returns `true` if no filter is set (only ordering applies).
    pub fn is_unfiltered(&self) -> bool {
        self.term.is_none()
            && self.brand.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Evaluates the filters against a single product.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.term {
            let term = term.to_lowercase();
            if !product.title.to_lowercase().contains(&term)
                && !product.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(brand) = &self.brand {
            if !product.brand.to_lowercase().contains(&brand.to_lowercase()) {
                return false;
            }
        }

        let price = product.price.get();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        true
    }

    /// Orders two products according to [`ProductQuery::sort`]. Equal prices
    /// fall back to id order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let by_id = || a.id.as_str().cmp(b.id.as_str());
        match self.sort {
            SortOrder::PriceAsc => a.price.get().total_cmp(&b.price.get()).then_with(by_id),
            SortOrder::PriceDesc => b.price.get().total_cmp(&a.price.get()).then_with(by_id),
            SortOrder::Id => by_id(),
        }
    }

    /// Filters and sorts an in-memory product list.
    pub fn apply(&self, products: impl IntoIterator<Item = Product>) -> Vec<Product> {
        let mut result: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        result.sort_by(|a, b| self.compare(a, b));
        result
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{Price, ProductId, ProductTitle};

    fn product(id: &str, title: &str, description: &str, brand: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id).expect("valid id"),
            title: ProductTitle::new(title).expect("valid title"),
            description: description.to_string(),
            brand: brand.to_string(),
            price: Price::new(price).expect("valid price"),
            created_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Hammer", "Steel claw hammer", "Husky", 15.0),
            product("10", "Drill", "Cordless DRILL driver", "DeWalt", 99.0),
            product("2", "Nails", "Box of 100", "", 4.5),
            product("3", "Saw", "Hand saw", "Husky Pro", 20.0),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn sort_parse_falls_back_to_id() {
        assert_eq!(SortOrder::parse(Some("price_asc")), SortOrder::PriceAsc);
        assert_eq!(SortOrder::parse(Some("price_desc")), SortOrder::PriceDesc);
        assert_eq!(SortOrder::parse(Some("name")), SortOrder::Id);
        assert_eq!(SortOrder::parse(None), SortOrder::Id);
    }

    #[test]
    fn default_order_is_lexicographic_by_id() {
        let result = ProductQuery::new().apply(catalog());
        assert_eq!(ids(&result), vec!["1", "10", "2", "3"]);
    }

    #[test]
    fn term_matches_title_or_description_case_insensitively() {
        let result = ProductQuery::new().term("drill").apply(catalog());
        assert_eq!(ids(&result), vec!["10"]);

        let result = ProductQuery::new().term("HAMMER").apply(catalog());
        assert_eq!(ids(&result), vec!["1"]);

        let result = ProductQuery::new().term("box").apply(catalog());
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn brand_is_a_substring_match() {
        let result = ProductQuery::new().brand("husky").apply(catalog());
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let result = ProductQuery::new()
            .min_price(15.0)
            .max_price(20.0)
            .apply(catalog());
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn non_finite_bounds_are_ignored() {
        let query = ProductQuery::new().min_price(f64::NAN).max_price(f64::INFINITY);
        assert!(query.is_unfiltered());
        assert_eq!(query.apply(catalog()).len(), 4);
    }

    #[test]
    fn filters_are_combined_with_and() {
        let result = ProductQuery::new()
            .term("saw")
            .brand("husky")
            .max_price(50.0)
            .apply(catalog());
        assert_eq!(ids(&result), vec!["3"]);

        let result = ProductQuery::new()
            .term("hammer")
            .brand("dewalt")
            .apply(catalog());
        assert!(result.is_empty());
    }

    #[test]
    fn price_desc_is_non_increasing() {
        let result = ProductQuery::new()
            .sort(SortOrder::PriceDesc)
            .apply(catalog());
        assert_eq!(ids(&result), vec!["10", "3", "1", "2"]);
        assert!(
            result
                .windows(2)
                .all(|pair| pair[0].price.get() >= pair[1].price.get())
        );
    }

    #[test]
    fn empty_strings_do_not_filter() {
        let query = ProductQuery::new().term("").brand("");
        assert!(query.is_unfiltered());
    }
}
