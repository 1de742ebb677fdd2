//! View models and page rendering.
//!
//! Rendering is a function of state: [`Page::build`] turns an [`AppState`]
//! into a tree of plain view structs with pre-formatted strings, and
//! [`Page::render`] feeds that tree to Askama templates. The host replaces
//! the whole root container with the result on every render.
//!
//! # Views
//!
//! ```text
//! #/home               - HomeView (chips, paginated grid, load more)
//! #/categories/<name>  - CategoryView (unpaginated grid)
//! #/product/<id>       - ProductDetailView (first product if id unknown)
//! #/cart               - CartView (lines, subtotal, checkout)
//! #/about              - static
//! anything else        - static not-found
//! ```

pub mod cart;
pub mod home;
pub mod pages;
pub mod product;

use askama::Template;

use crate::catalog::Product;
use crate::filters;
use crate::pipeline::SortMode;
use crate::router::Route;
use crate::state::AppState;

pub use cart::{CartLineView, CartView};
pub use home::{CategoryView, ChipView, HomeView};
pub use product::ProductDetailView;

/// Product card display data for grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub rating: String,
    pub price: String,
    pub badge: &'static str,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            category: product.category.to_string(),
            rating: product.rating.to_string(),
            price: product.unit_price().display(),
            badge: if product.popular {
                "Bestseller"
            } else {
                "Fresh pick"
            },
            image: product.image.clone(),
        }
    }
}

/// One `<option>` of the sort selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Site header: search, sort, theme toggle and cart badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub cart_count: u32,
    pub search: String,
    pub sort_options: Vec<SortOptionView>,
    pub theme: &'static str,
    pub theme_icon: &'static str,
    pub dark: bool,
}

impl HeaderView {
    fn build(state: &AppState) -> Self {
        let theme = state.theme();
        Self {
            cart_count: state.cart().total_item_count(),
            search: state.query().search.clone(),
            sort_options: SortMode::ALL
                .into_iter()
                .map(|mode| SortOptionView {
                    value: mode.as_str(),
                    label: mode.label(),
                    selected: mode == state.query().sort,
                })
                .collect(),
            theme: theme.as_str(),
            theme_icon: theme.icon(),
            dark: theme == crate::theme::Theme::Dark,
        }
    }
}

/// The main content for the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home(HomeView),
    Category(CategoryView),
    Product(ProductDetailView),
    Cart(CartView),
    About,
    NotFound,
}

impl View {
    /// Build the view for the current route.
    #[must_use]
    pub fn build(state: &AppState) -> Self {
        match state.route() {
            Route::Home => Self::Home(HomeView::build(state)),
            Route::Category(filter) => Self::Category(CategoryView::build(filter, state)),
            Route::Product(id) => state
                .detail_product(id.as_ref())
                .map_or(Self::NotFound, |p| Self::Product(ProductDetailView::from(p))),
            Route::Cart => Self::Cart(CartView::from(state.cart())),
            Route::About => Self::About,
            Route::NotFound(_) => Self::NotFound,
        }
    }

    /// Render just the main content.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn render(&self) -> askama::Result<String> {
        match self {
            Self::Home(home) => home::HomeTemplate { home }.render(),
            Self::Category(category) => home::CategoryTemplate { category }.render(),
            Self::Product(product) => product::ProductTemplate { product }.render(),
            Self::Cart(cart) => cart::CartTemplate { cart }.render(),
            Self::About => pages::AboutTemplate.render(),
            Self::NotFound => pages::NotFoundTemplate.render(),
        }
    }
}

/// A complete rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub header: HeaderView,
    pub view: View,
    pub quick_view: Option<ProductDetailView>,
    /// Transient notices (toasts) to show once.
    pub notices: Vec<String>,
}

impl Page {
    /// Build the page for the current state.
    #[must_use]
    pub fn build(state: &AppState, notices: Vec<String>) -> Self {
        Self {
            route: state.route().clone(),
            header: HeaderView::build(state),
            view: View::build(state),
            quick_view: state.quick_view().map(ProductDetailView::from),
            notices,
        }
    }

    /// Render the full page to HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn render(&self) -> askama::Result<String> {
        LayoutTemplate {
            header: &self.header,
            body: self.view.render()?,
            quick_view: self.quick_view.as_ref(),
            notices: &self.notices,
        }
        .render()
    }
}

/// Page shell template.
#[derive(Template)]
#[template(path = "layout.html")]
pub struct LayoutTemplate<'a> {
    pub header: &'a HeaderView,
    pub body: String,
    pub quick_view: Option<&'a ProductDetailView>,
    pub notices: &'a [String],
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use toyverse_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;
    use crate::state::{Action, Pagination};

    fn state() -> AppState {
        AppState::new(Catalog::toyverse(), Pagination::new(8, true))
    }

    fn go(state: &mut AppState, fragment: &str) {
        state.apply(
            Action::Navigate(Route::parse(fragment)),
            &mut StdRng::seed_from_u64(0),
        );
    }

    #[test]
    fn test_card_view_formats_price_and_badge() {
        let catalog = Catalog::toyverse();
        let card = ProductCardView::from(catalog.get(&ProductId::new("p2")).unwrap());
        assert_eq!(card.price, "$19.50");
        assert_eq!(card.badge, "Bestseller");
        assert_eq!(card.rating, "4.6");
    }

    #[test]
    fn test_unknown_route_builds_not_found() {
        let mut s = state();
        go(&mut s, "#/wat");
        assert_eq!(View::build(&s), View::NotFound);
        let html = Page::build(&s, Vec::new()).render().unwrap();
        assert!(html.contains("Page not found"));
    }

    #[test]
    fn test_unknown_product_renders_first_product() {
        let mut s = state();
        go(&mut s, "#/product/doesnotexist");
        match View::build(&s) {
            View::Product(detail) => assert_eq!(detail.title, "RoboKit Junior"),
            other => panic!("expected product view, got {other:?}"),
        }
    }

    #[test]
    fn test_header_reflects_state() {
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(0);
        s.apply(
            Action::AddToCart {
                id: ProductId::new("p1"),
                qty: 3,
            },
            &mut rng,
        );
        s.apply(Action::SetSort(SortMode::New), &mut rng);
        let header = HeaderView::build(&s);
        assert_eq!(header.cart_count, 3);
        let selected: Vec<_> = header
            .sort_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["new"]);
    }

    #[test]
    fn test_layout_renders_notices_and_escapes_search() {
        let mut s = state();
        s.apply(
            Action::SetSearch("<b>kite</b>".to_string()),
            &mut StdRng::seed_from_u64(0),
        );
        let html = Page::build(&s, vec!["Added to cart".to_string()])
            .render()
            .unwrap();
        assert!(html.contains("Added to cart"));
        assert!(!html.contains("<b>kite</b>"));
        assert!(html.contains("id=\"cartCount\""));
    }

    #[test]
    fn test_quick_view_overlay_rendered() {
        let mut s = state();
        s.apply(
            Action::OpenQuickView(ProductId::new("p3")),
            &mut StdRng::seed_from_u64(0),
        );
        let html = Page::build(&s, Vec::new()).render().unwrap();
        assert!(html.contains("id=\"productModal\""));
        assert!(html.contains("Adventure Kite"));
    }
}
