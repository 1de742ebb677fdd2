//! Filter/sort pipeline.
//!
//! [`compute_view`] maps the catalog plus the current category, search text
//! and sort mode to the ordered list of products to show. It is pure: the
//! same inputs always give the same output.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};
use toyverse_core::Category;

use crate::catalog::{Catalog, Product};

/// Category selection for the product list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// The `all` sentinel: no category filtering.
    #[default]
    All,
    Only(Category),
    /// A name that is not a catalog category. Matches nothing.
    Unknown(String),
}

impl CategoryFilter {
    /// Name of the `all` sentinel.
    pub const ALL: &'static str = "all";

    /// Interpret a category name from a chip or URL.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == Self::ALL {
            return Self::All;
        }
        name.parse::<Category>()
            .map_or_else(|_| Self::Unknown(name.to_owned()), Self::Only)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Only(category) => category.as_str(),
            Self::Unknown(name) => name,
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
            Self::Unknown(_) => false,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

/// Sort order for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Popular products first; otherwise keeps filtered order.
    #[default]
    #[serde(rename = "popular")]
    Popular,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    /// Newest first.
    #[serde(rename = "new")]
    New,
}

impl SortMode {
    /// All modes, in the order the sort selector lists them.
    pub const ALL: [Self; 4] = [Self::Popular, Self::PriceAsc, Self::PriceDesc, Self::New];

    /// Parse a selector value. Unrecognised values sort by popularity.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "new" => Self::New,
            _ => Self::Popular,
        }
    }

    /// Selector value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::New => "new",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Most popular",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::New => "Newest",
        }
    }
}

/// Inputs to the pipeline other than the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortMode,
}

impl ViewQuery {
    /// The trimmed, lower-cased search needle, if any.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        let needle = self.search.trim().to_lowercase();
        (!needle.is_empty()).then_some(needle)
    }
}

/// Filter and sort the catalog.
///
/// Category and search filters are combined with logical AND. All sorts are
/// stable, so ties keep catalog order.
#[must_use]
pub fn compute_view<'a>(catalog: &'a Catalog, query: &ViewQuery) -> Vec<&'a Product> {
    let needle = query.needle();
    let mut list: Vec<&Product> = catalog
        .iter()
        .filter(|p| query.category.matches(p))
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches(n)))
        .collect();

    match query.sort {
        SortMode::PriceAsc => list.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceDesc => list.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::New => list.sort_by_key(|p| Reverse(p.created_at)),
        SortMode::Popular => list.sort_by_key(|p| Reverse(p.popular)),
    }
    list
}
