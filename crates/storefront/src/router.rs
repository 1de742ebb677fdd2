//! Hash-fragment routing.
//!
//! A route is a named view plus at most one parameter. [`Route::parse`] turns
//! a location fragment such as `#/categories/STEM` into a [`Route`] without
//! touching any host navigation API, and [`Route::to_fragment`] goes the other
//! way.
//!
//! ```text
//! #/home                 - Home page (also used when the fragment is empty)
//! #/categories/<name>    - Category listing (<name> defaults to "all")
//! #/product/<id>         - Product detail
//! #/cart                 - Cart page
//! #/about                - About page
//! anything else          - Not found
//! ```

use std::borrow::Cow;
use std::fmt;

use toyverse_core::ProductId;

use crate::pipeline::CategoryFilter;

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Category(CategoryFilter),
    /// `None` when the fragment has no id segment.
    Product(Option<ProductId>),
    Cart,
    About,
    /// Holds the unrecognised path (without the leading `#`).
    NotFound(String),
}

impl Route {
    /// Parse a location fragment, with or without the leading `#`.
    ///
    /// Only the first two path segments are used; anything after the
    /// parameter is ignored. Parameters are percent-decoded.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        if path.is_empty() {
            return Self::Home;
        }

        let mut segments = path.split('/');
        if segments.next() != Some("") {
            return Self::NotFound(path.to_owned());
        }
        let name = segments.next().unwrap_or_default();
        let param = segments.next().filter(|s| !s.is_empty()).map(decode);

        match name {
            "home" => Self::Home,
            "categories" => Self::Category(
                param.map_or(CategoryFilter::All, |p| CategoryFilter::parse(&p)),
            ),
            "product" => Self::Product(param.map(|p| ProductId::new(p.into_owned()))),
            "cart" => Self::Cart,
            "about" => Self::About,
            _ => Self::NotFound(path.to_owned()),
        }
    }

    /// Canonical fragment for this route, including the leading `#`.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        match self {
            Self::Home => "#/home".to_string(),
            Self::Category(filter) => {
                format!("#/categories/{}", urlencoding::encode(filter.as_str()))
            }
            Self::Product(Some(id)) => format!("#/product/{}", urlencoding::encode(id.as_str())),
            Self::Product(None) => "#/product".to_string(),
            Self::Cart => "#/cart".to_string(),
            Self::About => "#/about".to_string(),
            Self::NotFound(path) => format!("#{path}"),
        }
    }

    /// Short route name, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Category(_) => "categories",
            Self::Product(_) => "product",
            Self::Cart => "cart",
            Self::About => "about",
            Self::NotFound(_) => "not-found",
        }
    }

    /// Convenience constructor for a product detail route.
    #[must_use]
    pub fn product(id: impl Into<ProductId>) -> Self {
        Self::Product(Some(id.into()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

fn decode(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}

#[cfg(test)]
mod tests {
    use toyverse_core::Category;

    use super::*;

    #[test]
    fn test_parse_named_routes() {
        assert_eq!(Route::parse("#/home"), Route::Home);
        assert_eq!(Route::parse("#/cart"), Route::Cart);
        assert_eq!(Route::parse("#/about"), Route::About);
        assert_eq!(Route::parse("/about"), Route::About);
    }

    #[test]
    fn test_empty_fragment_is_home() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(
            Route::parse("#/categories/STEM"),
            Route::Category(CategoryFilter::Only(Category::Stem))
        );
        assert_eq!(
            Route::parse("#/categories"),
            Route::Category(CategoryFilter::All)
        );
        assert_eq!(
            Route::parse("#/categories/"),
            Route::Category(CategoryFilter::All)
        );
        assert_eq!(
            Route::parse("#/categories/Board%20Games"),
            Route::Category(CategoryFilter::Unknown("Board Games".to_string()))
        );
    }

    #[test]
    fn test_parse_product() {
        assert_eq!(Route::parse("#/product/p3"), Route::product("p3"));
        assert_eq!(Route::parse("#/product"), Route::Product(None));
        assert_eq!(
            Route::parse("#/product/doesnotexist"),
            Route::product("doesnotexist")
        );
    }

    #[test]
    fn test_extra_segments_ignored() {
        assert_eq!(Route::parse("#/product/p1/reviews"), Route::product("p1"));
        assert_eq!(Route::parse("#/home/anything"), Route::Home);
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(
            Route::parse("#/checkout"),
            Route::NotFound("/checkout".to_string())
        );
        assert_eq!(Route::parse("#/"), Route::NotFound("/".to_string()));
        assert_eq!(Route::parse("#home"), Route::NotFound("home".to_string()));
    }

    #[test]
    fn test_to_fragment_is_canonical() {
        assert_eq!(Route::Home.to_fragment(), "#/home");
        assert_eq!(Route::product("p2").to_fragment(), "#/product/p2");
        assert_eq!(
            Route::Category(CategoryFilter::Unknown("Board Games".to_string())).to_fragment(),
            "#/categories/Board%20Games"
        );
        for route in [
            Route::Home,
            Route::Cart,
            Route::About,
            Route::product("p8"),
            Route::Category(CategoryFilter::Only(Category::Puzzles)),
        ] {
            assert_eq!(Route::parse(&route.to_fragment()), route);
        }
    }
}
