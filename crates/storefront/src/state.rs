//! Application state and the reducer that updates it.
//!
//! [`AppState`] is an explicit value owned by the runtime. Every user
//! interaction becomes an [`Action`]; [`AppState::apply`] mutates the state
//! and returns the [`Effect`]s the runtime must carry out (persisting,
//! navigating, showing a notice). The reducer itself never touches storage
//! or the host.

use rand::Rng;
use toyverse_core::{OrderId, ProductId};

use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::pipeline::{CategoryFilter, SortMode, ViewQuery, compute_view};
use crate::router::Route;
use crate::theme::Theme;

/// Notice shown after a product is added.
pub const NOTICE_ADDED: &str = "Added to cart";
/// Notice shown when checking out an empty cart.
pub const NOTICE_EMPTY_CART: &str = "Your cart is empty";

/// Home-page pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page count currently revealed.
    pub page: usize,
    pub page_size: usize,
    /// Advance automatically when the scroll sentinel becomes visible.
    pub infinite: bool,
}

impl Pagination {
    #[must_use]
    pub const fn new(page_size: usize, infinite: bool) -> Self {
        Self {
            page: 1,
            page_size,
            infinite,
        }
    }

    /// Number of items shown out of `total`.
    #[must_use]
    pub fn visible(&self, total: usize) -> usize {
        self.page.saturating_mul(self.page_size).min(total)
    }

    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        self.visible(total) < total
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(8, true)
    }
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The location fragment changed.
    Navigate(Route),
    SetSearch(String),
    ClearSearch,
    SetSort(SortMode),
    SelectCategory(CategoryFilter),
    AddToCart { id: ProductId, qty: u32 },
    RemoveFromCart(ProductId),
    SetQty { id: ProductId, qty: u32 },
    IncrementQty(ProductId),
    DecrementQty(ProductId),
    /// "Load More" button.
    LoadMore,
    /// The infinite-scroll sentinel scrolled into view.
    SentinelVisible,
    OpenQuickView(ProductId),
    CloseQuickView,
    Checkout,
    SetTheme(Theme),
    ToggleTheme,
    /// Bring a random product from the current listing into view.
    SurpriseMe,
}

/// Work for the runtime after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the whole cart to storage.
    PersistCart,
    /// Write the theme preference to storage.
    PersistTheme,
    /// Update the host's location fragment.
    Navigate(Route),
    /// Show a transient message.
    Notify(String),
    /// Scroll a product card into view.
    ScrollTo(ProductId),
}

/// Everything the storefront knows.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Catalog,
    query: ViewQuery,
    filtered: Vec<Product>,
    cart: Cart,
    route: Route,
    pagination: Pagination,
    theme: Theme,
    quick_view: Option<ProductId>,
}

impl AppState {
    /// Fresh state on the home route with an empty cart.
    #[must_use]
    pub fn new(catalog: Catalog, pagination: Pagination) -> Self {
        let mut state = Self {
            catalog,
            query: ViewQuery::default(),
            filtered: Vec::new(),
            cart: Cart::new(),
            route: Route::Home,
            pagination,
            theme: Theme::default(),
            quick_view: None,
        };
        state.recompute_view();
        state
    }

    /// Replace the cart, e.g. with one rehydrated from storage.
    #[must_use]
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = cart;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// The filtered, sorted product list.
    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Product shown in the quick-view overlay, if open.
    #[must_use]
    pub fn quick_view(&self) -> Option<&Product> {
        self.quick_view.as_ref().and_then(|id| self.catalog.get(id))
    }

    /// Products on screen for the current route.
    ///
    /// The home grid is paginated; the category page shows everything.
    #[must_use]
    pub fn visible_products(&self) -> &[Product] {
        match self.route {
            Route::Home => {
                let end = self.pagination.visible(self.filtered.len());
                self.filtered.get(..end).unwrap_or_default()
            }
            Route::Category(_) => &self.filtered,
            _ => &[],
        }
    }

    /// Product for the detail page: the requested one, or the first catalog
    /// product when the id is missing or unknown.
    #[must_use]
    pub fn detail_product(&self, id: Option<&ProductId>) -> Option<&Product> {
        id.and_then(|id| self.catalog.get(id))
            .or_else(|| self.catalog.first())
    }

    /// Apply an action and return the effects to run.
    pub fn apply<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Vec<Effect> {
        match action {
            Action::Navigate(route) => {
                self.quick_view = None;
                if let Route::Category(filter) = &route {
                    self.query.category = filter.clone();
                    self.recompute_view();
                }
                self.route = route;
                Vec::new()
            }
            Action::SetSearch(search) => {
                self.query.search = search;
                self.recompute_view();
                Vec::new()
            }
            Action::ClearSearch => {
                self.query.search.clear();
                self.recompute_view();
                Vec::new()
            }
            Action::SetSort(sort) => {
                self.query.sort = sort;
                self.recompute_view();
                Vec::new()
            }
            Action::SelectCategory(filter) => {
                self.query.category = filter;
                self.recompute_view();
                Vec::new()
            }
            Action::AddToCart { id, qty } => {
                if !self.cart.add(&self.catalog, &id, qty) {
                    return Vec::new();
                }
                if self.quick_view.as_ref() == Some(&id) {
                    self.quick_view = None;
                }
                vec![Effect::PersistCart, Effect::Notify(NOTICE_ADDED.to_string())]
            }
            Action::RemoveFromCart(id) => persist_if(self.cart.remove(&id)),
            Action::SetQty { id, qty } => persist_if(self.cart.set_qty(&id, qty)),
            Action::IncrementQty(id) => persist_if(self.cart.increment(&id)),
            Action::DecrementQty(id) => persist_if(self.cart.decrement(&id)),
            Action::LoadMore => {
                self.advance_page();
                Vec::new()
            }
            Action::SentinelVisible => {
                if self.pagination.infinite && matches!(self.route, Route::Home) {
                    self.advance_page();
                }
                Vec::new()
            }
            Action::OpenQuickView(id) => {
                if self.catalog.contains(&id) {
                    self.quick_view = Some(id);
                }
                Vec::new()
            }
            Action::CloseQuickView => {
                self.quick_view = None;
                Vec::new()
            }
            Action::Checkout => self.checkout(rng),
            Action::SetTheme(theme) => {
                self.theme = theme;
                vec![Effect::PersistTheme]
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                vec![Effect::PersistTheme]
            }
            Action::SurpriseMe => {
                let visible = self.visible_products();
                if visible.is_empty() {
                    return Vec::new();
                }
                let idx = rng.random_range(0..visible.len());
                visible
                    .get(idx)
                    .map(|p| vec![Effect::ScrollTo(p.id.clone())])
                    .unwrap_or_default()
            }
        }
    }

    fn checkout<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Effect> {
        if self.cart.is_empty() {
            return vec![Effect::Notify(NOTICE_EMPTY_CART.to_string())];
        }
        let order_id = OrderId::generate(rng);
        tracing::info!(
            order_id = %order_id,
            items = self.cart.total_item_count(),
            subtotal = %self.cart.subtotal(),
            "Order placed"
        );
        self.cart.clear();
        self.quick_view = None;
        self.route = Route::Home;
        vec![
            Effect::PersistCart,
            Effect::Notify(format!("Order {order_id} placed!")),
            Effect::Navigate(Route::Home),
        ]
    }

    fn advance_page(&mut self) {
        if self.pagination.has_more(self.filtered.len()) {
            self.pagination.page += 1;
        }
    }

    fn recompute_view(&mut self) {
        self.filtered = compute_view(&self.catalog, &self.query)
            .into_iter()
            .cloned()
            .collect();
        self.pagination.page = 1;
    }
}

fn persist_if(changed: bool) -> Vec<Effect> {
    if changed {
        vec![Effect::PersistCart]
    } else {
        Vec::new()
    }
}
