//! Home and category listings.

use askama::Template;
use toyverse_core::Category;

use super::ProductCardView;
use crate::pipeline::CategoryFilter;
use crate::state::AppState;

/// A category chip above the home grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    /// Value sent back on click (`data-category`).
    pub name: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Home page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub chips: Vec<ChipView>,
    /// The first `page * page_size` filtered products.
    pub products: Vec<ProductCardView>,
    pub shown: usize,
    pub total: usize,
    pub load_more_disabled: bool,
    /// Render the infinite-scroll sentinel.
    pub infinite: bool,
}

impl HomeView {
    #[must_use]
    pub fn build(state: &AppState) -> Self {
        let active = state.query().category.as_str();
        let chips = std::iter::once((CategoryFilter::ALL, "All"))
            .chain(Category::ALL.into_iter().map(|c| (c.as_str(), c.as_str())))
            .map(|(name, label)| ChipView {
                name,
                label,
                active: name == active,
            })
            .collect();

        let total = state.filtered().len();
        let pagination = state.pagination();
        let shown = pagination.visible(total);
        let products = state
            .filtered()
            .iter()
            .take(shown)
            .map(ProductCardView::from)
            .collect();

        Self {
            chips,
            products,
            shown,
            total,
            load_more_disabled: shown >= total,
            infinite: pagination.infinite,
        }
    }
}

/// Category page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub heading: String,
    pub products: Vec<ProductCardView>,
}

impl CategoryView {
    #[must_use]
    pub fn build(filter: &CategoryFilter, state: &AppState) -> Self {
        let heading = match filter {
            CategoryFilter::All => "All Products".to_string(),
            other => other.as_str().to_string(),
        };
        Self {
            heading,
            products: state.filtered().iter().map(ProductCardView::from).collect(),
        }
    }
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub home: &'a HomeView,
}

/// Category page template.
#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryTemplate<'a> {
    pub category: &'a CategoryView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::Catalog;
    use crate::pipeline::SortMode;
    use crate::router::Route;
    use crate::state::{Action, Pagination};

    #[test]
    fn test_home_paginates_and_disables_load_more() {
        let mut state = AppState::new(Catalog::toyverse(), Pagination::new(5, true));
        let home = HomeView::build(&state);
        assert_eq!(home.products.len(), 5);
        assert!(!home.load_more_disabled);

        state.apply(Action::LoadMore, &mut StdRng::seed_from_u64(0));
        let home = HomeView::build(&state);
        assert_eq!(home.products.len(), 8);
        assert_eq!(home.shown, home.total);
        assert!(home.load_more_disabled);
    }

    #[test]
    fn test_chips_mark_active_category() {
        let mut state = AppState::new(Catalog::toyverse(), Pagination::default());
        state.apply(
            Action::SelectCategory(CategoryFilter::Only(Category::Plush)),
            &mut StdRng::seed_from_u64(0),
        );
        let home = HomeView::build(&state);
        let active: Vec<_> = home.chips.iter().filter(|c| c.active).map(|c| c.name).collect();
        assert_eq!(active, vec!["Plush"]);
        assert_eq!(home.chips.len(), 5);
    }

    #[test]
    fn test_home_html_has_grid_and_controls() {
        let mut state = AppState::new(Catalog::toyverse(), Pagination::default());
        state.apply(Action::SetSort(SortMode::PriceAsc), &mut StdRng::seed_from_u64(0));
        let html = HomeTemplate {
            home: &HomeView::build(&state),
        }
        .render()
        .unwrap();
        assert!(html.contains("id=\"loadMore\""));
        assert!(html.contains("data-add=\"p7\""));
        let first = html.find("Rainbow Skipping Rope").unwrap();
        let last = html.find("Circuit Lab Pro").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_category_page_is_unpaginated() {
        let mut state = AppState::new(Catalog::toyverse(), Pagination::new(1, true));
        state.apply(
            Action::Navigate(Route::parse("#/categories/all")),
            &mut StdRng::seed_from_u64(0),
        );
        let view = CategoryView::build(&CategoryFilter::All, &state);
        assert_eq!(view.heading, "All Products");
        assert_eq!(view.products.len(), 8);
    }
}
