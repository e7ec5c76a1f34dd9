//! Controller translating user actions into API calls and keeping the client
//! state and view phase in sync with the responses.

use std::time::Instant;

use crate::client::state::CatalogState;
use crate::client::view::{CatalogView, StatusBanner, ViewPhase};
use crate::client::{ApiResult, CatalogApi};
use crate::domain::product::Product;
use crate::domain::query::SortOrder;
use crate::domain::types::ProductId;
use crate::dto::products::SearchParams;
use crate::forms::products::{CreateProductForm, PriceInput, UpdateProductForm};

/// Sequence number issued for every list or search request.
///
/// Only the response carrying the most recently issued ticket is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Owns the client state and drives it through a [`CatalogApi`].
pub struct CatalogController<A> {
    api: A,
    state: CatalogState,
    phase: ViewPhase,
    banner: Option<StatusBanner>,
    editing: Option<ProductId>,
    last_issued: u64,
    pending: Option<RequestTicket>,
}

impl<A> CatalogController<A>
where
    A: CatalogApi,
{
    pub fn new(api: A) -> Self {
        Self::with_state(api, CatalogState::new())
    }

    pub fn with_state(api: A, state: CatalogState) -> Self {
        Self {
            api,
            state,
            phase: ViewPhase::Idle,
            banner: None,
            editing: None,
            last_issued: 0,
            pending: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn banner(&self) -> Option<&StatusBanner> {
        self.banner.as_ref()
    }

    pub fn editing(&self) -> Option<&ProductId> {
        self.editing.as_ref()
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.last_issued += 1;
        let ticket = RequestTicket(self.last_issued);
        self.pending = Some(ticket);
        self.phase = ViewPhase::Loading;
        ticket
    }

    /// Takes the pending ticket if `ticket` is the latest one issued.
    fn accept(&mut self, ticket: RequestTicket) -> bool {
        if self.pending != Some(ticket) {
            log::debug!("Discarding stale response for request {}", ticket.0);
            return false;
        }
        self.pending = None;
        true
    }

    fn show_products(&mut self) {
        self.phase = if self.state.is_empty() {
            ViewPhase::Empty
        } else {
            ViewPhase::Populated
        };
    }

    fn show_error(&mut self, message: &str, now: Instant) {
        self.phase = ViewPhase::Error;
        self.banner = Some(StatusBanner::error(message, now));
    }

    /// Starts a full catalog fetch and switches the view to loading.
    pub fn begin_fetch(&mut self) -> RequestTicket {
        self.issue_ticket()
    }

    /// Starts a search and switches the view to loading.
    pub fn begin_search(&mut self) -> RequestTicket {
        self.issue_ticket()
    }

    /// Applies the response of a full fetch. Returns `false` when the
    /// response is stale and was dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: RequestTicket,
        result: ApiResult<Vec<Product>>,
        now: Instant,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        match result {
            Ok(products) => {
                self.state.replace_catalog(products);
                self.show_products();
            }
            Err(err) => {
                log::error!("Error fetching products: {err}");
                self.show_error("Error fetching products. Please try again.", now);
            }
        }
        true
    }

    /// Applies the response of a search. Returns `false` when the response
    /// is stale and was dropped.
    pub fn complete_search(
        &mut self,
        ticket: RequestTicket,
        result: ApiResult<Vec<Product>>,
        now: Instant,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        match result {
            Ok(products) => {
                self.state.replace_search_results(products);
                self.show_products();
            }
            Err(err) => {
                log::error!("Error searching products: {err}");
                self.show_error("Error searching products. Please try again.", now);
            }
        }
        true
    }

    /// Fetches the whole catalog in the given order.
    pub fn refresh(&mut self, sort: SortOrder, now: Instant) {
        log::info!(
            "Fetching Products (sort: {})",
            sort.as_param().unwrap_or("default")
        );
        let ticket = self.begin_fetch();
        let result = self.api.list_products(sort);
        self.complete_fetch(ticket, result, now);
    }

    pub fn search(&mut self, params: SearchParams, now: Instant) {
        log::info!("Searching Products {params:?}");
        let ticket = self.begin_search();
        let result = self.api.search_products(&params);
        self.complete_search(ticket, result, now);
    }

    pub fn reset_search(&mut self, now: Instant) {
        log::info!("Resetting Search");
        self.refresh(SortOrder::Id, now);
    }

    /// Creates a product and re-fetches the catalog on success.
    pub fn add_product(&mut self, form: CreateProductForm, now: Instant) -> bool {
        log::info!(
            "Adding Product (title: {:?}, brand: {:?})",
            form.title,
            form.brand
        );
        match self.api.create_product(&form) {
            Ok(product) => {
                log::info!("Product {} created", product.id);
                self.banner = Some(StatusBanner::success("Product added successfully!", now));
                self.refresh(SortOrder::Id, now);
                true
            }
            Err(err) => {
                log::error!("Error adding product: {err}");
                self.banner = Some(StatusBanner::error(
                    "Error adding product. Please try again.",
                    now,
                ));
                false
            }
        }
    }

    /// Returns the update form prefilled with the product's current values.
    pub fn open_update_form(&mut self, id: &str) -> Option<UpdateProductForm> {
        let product = self.state.find(id)?;
        log::info!("Opening Update Form (id: {}, title: {})", product.id, product.title);

        let form = UpdateProductForm {
            title: Some(product.title.to_string()),
            description: Some(product.description.clone()),
            brand: Some(product.brand.clone()),
            price: Some(PriceInput::Number(product.price.get())),
        };
        self.editing = Some(product.id.clone());
        Some(form)
    }

    pub fn cancel_update(&mut self) {
        self.editing = None;
    }

    /// Updates a product and re-fetches the catalog on success.
    pub fn update_product(&mut self, id: &str, form: UpdateProductForm, now: Instant) -> bool {
        log::info!(
            "Updating Product (id: {id}, title: {:?}, brand: {:?})",
            form.title,
            form.brand
        );
        match self.api.update_product(id, &form) {
            Ok(_) => {
                self.banner = Some(StatusBanner::success(
                    "Product updated successfully!",
                    now,
                ));
                self.editing = None;
                self.refresh(SortOrder::Id, now);
                true
            }
            Err(err) => {
                log::error!("Error updating product: {err}");
                self.banner = Some(StatusBanner::error(
                    "Error updating product. Please try again.",
                    now,
                ));
                false
            }
        }
    }

    /// Deletes a product and re-fetches the catalog on success.
    pub fn delete_product(&mut self, id: &str, now: Instant) -> bool {
        log::info!("Deleting Product (id: {id})");
        match self.api.delete_product(id) {
            Ok(()) => {
                self.banner = Some(StatusBanner::success(
                    "Product deleted successfully!",
                    now,
                ));
                if self.editing.as_ref().is_some_and(|e| e.as_str() == id) {
                    self.editing = None;
                }
                self.refresh(SortOrder::Id, now);
                true
            }
            Err(err) => {
                log::error!("Error deleting product: {err}");
                self.banner = Some(StatusBanner::error(
                    "Error deleting product. Please try again.",
                    now,
                ));
                false
            }
        }
    }

    /// Switches to `page` without re-fetching. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.state.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.state.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.state.previous_page()
    }

    pub fn view(&self, now: Instant) -> CatalogView {
        CatalogView::derive(
            &self.state,
            self.phase,
            self.banner.as_ref(),
            self.editing.as_ref(),
            now,
        )
    }
}
