//! Product catalog.
//!
//! The catalog is loaded once at startup and never changes afterwards. It is
//! the single source of truth for product identity: the cart only ever holds
//! snapshots of products found here.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toyverse_core::{Category, Price, ProductId};

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no products")]
    Empty,
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A purchasable product.
///
/// The JSON shape matches what the browser build writes to local storage:
/// `createdAt` in camelCase and `price` as a plain number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Average rating, 0 to 5.
    pub rating: f64,
    pub popular: bool,
    /// Date added, as `YYYYMMDD`.
    pub created_at: u32,
    pub image: String,
    pub desc: String,
}

impl Product {
    /// Unit price with currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.desc.to_lowercase().contains(needle)
    }
}

/// The immutable, non-empty list of products.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` or `CatalogError::DuplicateId`.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the product list is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// The built-in ToyVerse catalog.
    #[must_use]
    pub fn toyverse() -> Self {
        Self {
            products: vec![
                product(
                    "p1",
                    "RoboKit Junior",
                    Category::Stem,
                    3999,
                    4.7,
                    true,
                    20_240_202,
                    "robokit",
                    "Build-and-play robotics kit that teaches fundamentals of mechanics and coding.",
                ),
                product(
                    "p2",
                    "CuddleBear Plush",
                    Category::Plush,
                    1950,
                    4.6,
                    true,
                    20_240_510,
                    "bear",
                    "Ultra-soft hypoallergenic plush bear that gives the best cuddles.",
                ),
                product(
                    "p3",
                    "Adventure Kite",
                    Category::Outdoor,
                    2400,
                    4.4,
                    false,
                    20_240_110,
                    "kite",
                    "High-flying kite with durable frame for breezy outdoor fun.",
                ),
                product(
                    "p4",
                    "BrainTease 500",
                    Category::Puzzles,
                    1675,
                    4.1,
                    false,
                    20_240_312,
                    "puzzle",
                    "500-piece colorful puzzle to unwind and sharpen the mind.",
                ),
                product(
                    "p5",
                    "Circuit Lab Pro",
                    Category::Stem,
                    5400,
                    4.8,
                    true,
                    20_240_601,
                    "circuit",
                    "Hands-on electronics kit with safe snap components.",
                ),
                product(
                    "p6",
                    "DinoBuddy",
                    Category::Plush,
                    2299,
                    4.5,
                    true,
                    20_240_422,
                    "dino",
                    "Friendly dinosaur plush for imaginative adventures.",
                ),
                product(
                    "p7",
                    "Rainbow Skipping Rope",
                    Category::Outdoor,
                    899,
                    4.3,
                    false,
                    20_240_125,
                    "rope",
                    "Colorful rope to keep kids active and smiling.",
                ),
                product(
                    "p8",
                    "MindBlocks",
                    Category::Puzzles,
                    2900,
                    4.6,
                    true,
                    20_240_222,
                    "blocks",
                    "Modular puzzle blocks that snap in satisfying ways.",
                ),
            ],
        }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Whether a product with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// The first product in catalog order.
    #[must_use]
    pub fn first(&self) -> Option<&Product> {
        self.products.first()
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::toyverse()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    title: &str,
    category: Category,
    price_cents: i64,
    rating: f64,
    popular: bool,
    created_at: u32,
    image_seed: &str,
    desc: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        category,
        price: Decimal::new(price_cents, 2),
        rating,
        popular,
        created_at,
        image: format!("https://picsum.photos/seed/{image_seed}/600/400"),
        desc: desc.to_owned(),
    }
}
