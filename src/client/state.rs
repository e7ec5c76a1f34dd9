use std::collections::BTreeSet;

use crate::domain::product::Product;
use crate::pagination::{self, DEFAULT_ITEMS_PER_PAGE, Paginated};

/// Products last fetched by the client together with the current page and
/// the brands offered by the search form.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogState {
    products: Vec<Product>,
    brands: Vec<String>,
    current_page: usize,
    per_page: usize,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn with_page_size(per_page: usize) -> Self {
        Self {
            products: Vec::new(),
            brands: Vec::new(),
            current_page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Replaces the list after an unfiltered fetch and rebuilds the brand set.
    pub fn replace_catalog(&mut self, products: Vec<Product>) {
        self.brands = collect_brands(&products);
        self.products = products;
        self.current_page = 1;
    }

    /// Replaces the list with search results. Brands stay as they were so the
    /// search form keeps offering the full set.
    pub fn replace_search_results(&mut self, products: Vec<Product>) {
        self.products = products;
        self.current_page = 1;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.products.len(), self.per_page)
    }

    /// Products shown on the current page.
    pub fn page_items(&self) -> &[Product] {
        pagination::page_slice(&self.products, self.current_page, self.per_page)
    }

    pub fn paginated(&self) -> Paginated<Product> {
        Paginated::from_slice(&self.products, self.current_page, self.per_page)
    }

    /// Moves to `page`. Pages outside `[1, total_pages]` are ignored and
    /// `false` is returned.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.set_page(self.current_page - 1)
    }
}

fn collect_brands(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.brand.trim())
        .filter(|brand| !brand.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
