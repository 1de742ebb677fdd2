//! Cart page.

use askama::Template;

use crate::cart::{Cart, CartEntry};

/// One cart line, pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub unit_price: String,
    pub qty: u32,
    pub line_total: String,
}

impl From<&CartEntry> for CartLineView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: entry.product.id.to_string(),
            title: entry.product.title.clone(),
            image: entry.product.image.clone(),
            unit_price: entry.product.unit_price().display(),
            qty: entry.qty,
            line_total: entry.line_total().display(),
        }
    }
}

/// Cart page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.entries().map(CartLineView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.total_item_count(),
        }
    }
}

/// Cart page template.
#[derive(Template)]
#[template(path = "cart.html")]
pub struct CartTemplate<'a> {
    pub cart: &'a CartView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use toyverse_core::ProductId;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_empty_cart_message() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        let html = CartTemplate { cart: &view }.render().unwrap();
        assert!(html.contains("Your cart is feeling empty."));
        assert!(html.contains("id=\"checkoutBtn\""));
        assert!(html.contains("$0.00"));
    }

    #[test]
    fn test_lines_and_subtotal() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        cart.add(&catalog, &ProductId::new("p2"), 2);
        cart.add(&catalog, &ProductId::new("p7"), 1);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines.first().unwrap().line_total, "$39.00");

        let html = CartTemplate { cart: &view }.render().unwrap();
        assert!(html.contains("data-inc=\"p2\""));
        assert!(html.contains("data-remove=\"p7\""));
        assert!(html.contains("id=\"checkoutBtn\""));
        assert!(html.contains(&view.subtotal));
    }
}
