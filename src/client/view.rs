//! View model rebuilt from scratch after every state change.

use std::time::{Duration, Instant};

use crate::client::state::CatalogState;
use crate::domain::product::Product;
use crate::domain::types::ProductId;

/// How long a status banner stays visible.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(3);

pub const EMPTY_MESSAGE: &str = "No products found.";
pub const LOADING_MESSAGE: &str = "Loading products...";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Idle,
    Loading,
    Populated,
    Empty,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient notice shown above the catalog. It never blocks interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBanner {
    pub message: String,
    pub kind: BannerKind,
    pub shown_at: Instant,
}

impl StatusBanner {
    pub fn success(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind: BannerKind::Success,
            shown_at: now,
        }
    }

    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind: BannerKind::Error,
            shown_at: now,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < BANNER_TIMEOUT
    }
}

/// Display strings of one product card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub price_label: String,
    pub brand_label: String,
    pub description: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        let brand_label = if product.brand.is_empty() {
            "Brand: Unknown".to_string()
        } else {
            format!("Brand: {}", product.brand)
        };
        let description = if product.description.is_empty() {
            "No description available".to_string()
        } else {
            product.description.clone()
        };

        Self {
            id: product.id.clone(),
            title: product.title.to_string(),
            price_label: format!("${:.2}", product.price.get()),
            brand_label,
            description,
        }
    }
}

/// One element of the pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageControl {
    Previous { enabled: bool },
    Page { number: usize, current: bool },
    Ellipsis,
    Next { enabled: bool },
}

fn page_controls(state: &CatalogState) -> Vec<PageControl> {
    let paginated = state.paginated();
    if !paginated.has_controls() {
        return Vec::new();
    }

    let mut controls = Vec::with_capacity(paginated.pages.len() + 2);
    controls.push(PageControl::Previous {
        enabled: paginated.has_previous(),
    });
    controls.extend(paginated.pages.iter().map(|page| match page {
        Some(number) => PageControl::Page {
            number: *number,
            current: *number == paginated.page,
        },
        None => PageControl::Ellipsis,
    }));
    controls.push(PageControl::Next {
        enabled: paginated.has_next(),
    });
    controls
}

/// Everything the catalog page shows, derived from the client state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogView {
    pub phase: ViewPhase,
    pub loading_message: Option<&'static str>,
    pub empty_message: Option<&'static str>,
    pub cards: Vec<ProductCard>,
    pub controls: Vec<PageControl>,
    pub brands: Vec<String>,
    pub banner: Option<StatusBanner>,
    pub editing: Option<ProductId>,
}

impl CatalogView {
    pub fn derive(
        state: &CatalogState,
        phase: ViewPhase,
        banner: Option<&StatusBanner>,
        editing: Option<&ProductId>,
        now: Instant,
    ) -> Self {
        let mut view = Self {
            phase,
            loading_message: None,
            empty_message: None,
            cards: Vec::new(),
            controls: Vec::new(),
            brands: state.brands().to_vec(),
            banner: banner.filter(|b| b.is_visible_at(now)).cloned(),
            editing: editing.cloned(),
        };

        match phase {
            ViewPhase::Idle => {}
            ViewPhase::Loading => view.loading_message = Some(LOADING_MESSAGE),
            ViewPhase::Empty | ViewPhase::Error => view.empty_message = Some(EMPTY_MESSAGE),
            ViewPhase::Populated => {
                view.cards = state.page_items().iter().map(ProductCard::from).collect();
                view.controls = page_controls(state);
            }
        }

        view
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{Price, ProductTitle};

    fn product(id: usize, brand: &str, description: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id.to_string()).unwrap(),
            title: ProductTitle::new(format!("Product {id}")).unwrap(),
            description: description.to_string(),
            brand: brand.to_string(),
            price: Price::new(price).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn state_with(count: usize) -> CatalogState {
        let mut state = CatalogState::new();
        state.replace_catalog((1..=count).map(|id| product(id, "", "", 1.0)).collect());
        state
    }

    #[test]
    fn card_labels() {
        let card = ProductCard::from(&product(1, "Acme", "Blue mug", 9.5));
        assert_eq!(card.price_label, "$9.50");
        assert_eq!(card.brand_label, "Brand: Acme");
        assert_eq!(card.description, "Blue mug");

        let bare = ProductCard::from(&product(2, "", "", 0.0));
        assert_eq!(bare.price_label, "$0.00");
        assert_eq!(bare.brand_label, "Brand: Unknown");
        assert_eq!(bare.description, "No description available");
    }

    #[test]
    fn banner_expires_after_three_seconds() {
        let shown = Instant::now();
        let banner = StatusBanner::success("Product added successfully!", shown);

        assert!(banner.is_visible_at(shown));
        assert!(banner.is_visible_at(shown + Duration::from_millis(2999)));
        assert!(!banner.is_visible_at(shown + BANNER_TIMEOUT));
    }

    #[test]
    fn loading_hides_previous_content() {
        let state = state_with(5);
        let view = CatalogView::derive(&state, ViewPhase::Loading, None, None, Instant::now());

        assert_eq!(view.loading_message, Some(LOADING_MESSAGE));
        assert!(view.cards.is_empty());
        assert!(view.controls.is_empty());
    }

    #[test]
    fn error_shows_empty_message_and_banner() {
        let now = Instant::now();
        let state = CatalogState::new();
        let banner = StatusBanner::error("Error fetching products. Please try again.", now);

        let view = CatalogView::derive(&state, ViewPhase::Error, Some(&banner), None, now);
        assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
        assert!(view.loading_message.is_none());
        assert_eq!(view.banner.as_ref(), Some(&banner));

        let later = CatalogView::derive(
            &state,
            ViewPhase::Error,
            Some(&banner),
            None,
            now + BANNER_TIMEOUT,
        );
        assert!(later.banner.is_none());
    }

    #[test]
    fn single_page_has_no_controls() {
        let state = state_with(18);
        let view = CatalogView::derive(&state, ViewPhase::Populated, None, None, Instant::now());

        assert_eq!(view.cards.len(), 18);
        assert!(view.controls.is_empty());
    }

    #[test]
    fn controls_mark_current_page_and_disable_edges() {
        let state = state_with(37);
        let view = CatalogView::derive(&state, ViewPhase::Populated, None, None, Instant::now());

        assert_eq!(
            view.controls,
            vec![
                PageControl::Previous { enabled: false },
                PageControl::Page {
                    number: 1,
                    current: true
                },
                PageControl::Page {
                    number: 2,
                    current: false
                },
                PageControl::Page {
                    number: 3,
                    current: false
                },
                PageControl::Next { enabled: true },
            ]
        );
    }
}
