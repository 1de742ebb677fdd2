//! Product detail page and quick-view overlay.

use askama::Template;

use crate::catalog::Product;

/// Product detail display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.desc.clone(),
            price: product.unit_price().display(),
            image: product.image.clone(),
        }
    }
}

/// Product detail page template.
#[derive(Template)]
#[template(path = "product.html")]
pub struct ProductTemplate<'a> {
    pub product: &'a ProductDetailView,
}
