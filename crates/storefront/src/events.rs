//! Event wiring.
//!
//! Hosts listen on a few stable containers and report what happened as a
//! [`UiEvent`]. For clicks, the host passes the closest ancestor's `data-*`
//! attribute (or the element id for singleton controls); this module turns
//! that into an [`Action`]. No business logic lives here beyond dispatch and
//! quantity coercion.

use toyverse_core::ProductId;

use crate::pipeline::{CategoryFilter, SortMode};
use crate::router::Route;
use crate::state::Action;

/// `data-*` attributes emitted by the templates.
pub mod attr {
    pub const ADD: &str = "data-add";
    pub const VIEW: &str = "data-view";
    pub const INC: &str = "data-inc";
    pub const DEC: &str = "data-dec";
    pub const REMOVE: &str = "data-remove";
    pub const QTY: &str = "data-qty";
    pub const CATEGORY: &str = "data-category";
    pub const CLOSE_MODAL: &str = "data-close-modal";
}

/// Element ids of singleton controls.
pub mod ids {
    pub const SEARCH_INPUT: &str = "searchInput";
    pub const CLEAR_SEARCH: &str = "clearSearch";
    pub const SORT_SELECT: &str = "sortSelect";
    pub const LOAD_MORE: &str = "loadMore";
    pub const CHECKOUT: &str = "checkoutBtn";
    pub const THEME_TOGGLE: &str = "themeToggle";
    pub const SURPRISE_ME: &str = "surpriseMe";
}

/// Something that was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    Add(ProductId),
    View(ProductId),
    Inc(ProductId),
    Dec(ProductId),
    Remove(ProductId),
    Category(String),
    CloseModal,
    LoadMore,
    Checkout,
    ClearSearch,
    ThemeToggle,
    SurpriseMe,
}

impl ClickTarget {
    /// Resolve a delegated click from the closest `data-*` attribute.
    #[must_use]
    pub fn from_attribute(name: &str, value: &str) -> Option<Self> {
        let id = || ProductId::new(value);
        let target = match name {
            attr::ADD => Self::Add(id()),
            attr::VIEW => Self::View(id()),
            attr::INC => Self::Inc(id()),
            attr::DEC => Self::Dec(id()),
            attr::REMOVE => Self::Remove(id()),
            attr::CATEGORY => Self::Category(value.to_owned()),
            attr::CLOSE_MODAL => Self::CloseModal,
            _ => return None,
        };
        Some(target)
    }

    /// Resolve a click on a singleton control by element id.
    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        let target = match id {
            ids::LOAD_MORE => Self::LoadMore,
            ids::CHECKOUT => Self::Checkout,
            ids::CLEAR_SEARCH => Self::ClearSearch,
            ids::THEME_TOGGLE => Self::ThemeToggle,
            ids::SURPRISE_ME => Self::SurpriseMe,
            _ => return None,
        };
        Some(target)
    }
}

/// A raw interaction reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(ClickTarget),
    /// Typing in a cart quantity field.
    QtyInput { id: ProductId, value: String },
    /// Typing in the search box.
    SearchInput(String),
    /// The sort selector changed.
    SortChange(String),
    /// A key was pressed (`KeyboardEvent.key`).
    KeyDown(String),
    /// The infinite-scroll sentinel intersected the viewport.
    SentinelVisible,
    /// The location fragment changed (including back/forward).
    HashChange(String),
}

impl UiEvent {
    /// Translate the interaction into a state action, if it means anything.
    #[must_use]
    pub fn into_action(self) -> Option<Action> {
        let action = match self {
            Self::Click(target) => match target {
                ClickTarget::Add(id) => Action::AddToCart { id, qty: 1 },
                ClickTarget::View(id) => Action::OpenQuickView(id),
                ClickTarget::Inc(id) => Action::IncrementQty(id),
                ClickTarget::Dec(id) => Action::DecrementQty(id),
                ClickTarget::Remove(id) => Action::RemoveFromCart(id),
                ClickTarget::Category(name) => Action::SelectCategory(CategoryFilter::parse(&name)),
                ClickTarget::CloseModal => Action::CloseQuickView,
                ClickTarget::LoadMore => Action::LoadMore,
                ClickTarget::Checkout => Action::Checkout,
                ClickTarget::ClearSearch => Action::ClearSearch,
                ClickTarget::ThemeToggle => Action::ToggleTheme,
                ClickTarget::SurpriseMe => Action::SurpriseMe,
            },
            Self::QtyInput { id, value } => Action::SetQty {
                id,
                qty: parse_qty_input(&value)?,
            },
            Self::SearchInput(text) => Action::SetSearch(text),
            Self::SortChange(value) => Action::SetSort(SortMode::parse(&value)),
            Self::KeyDown(key) if key == "Escape" => Action::CloseQuickView,
            Self::KeyDown(_) => return None,
            Self::SentinelVisible => Action::SentinelVisible,
            Self::HashChange(fragment) => Action::Navigate(Route::parse(&fragment)),
        };
        Some(action)
    }
}

/// Coerce quantity-field text: strip everything but ASCII digits and parse.
///
/// Returns `None` when no digits remain, in which case the previous quantity
/// is kept. Numbers too large for `u32` saturate at `u32::MAX`.
#[must_use]
pub fn parse_qty_input(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail on a non-empty run of ASCII digits.
    Some(digits.parse().unwrap_or(u32::MAX))
}
