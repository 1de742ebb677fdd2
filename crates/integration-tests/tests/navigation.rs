//! Hash routing and page selection.

#![allow(clippy::unwrap_used)]

use toyverse_core::Category;
use toyverse_integration_tests::start_with;
use toyverse_storefront::events::{ClickTarget, UiEvent};
use toyverse_storefront::pipeline::CategoryFilter;
use toyverse_storefront::router::Route;
use toyverse_storefront::storage::MemoryStorage;
use toyverse_storefront::views::View;

fn go(fragment: &str) -> View {
    let (mut storefront, _) = start_with(MemoryStorage::new(), "#/home");
    storefront.handle(UiEvent::HashChange(fragment.to_string()));
    storefront.render().view
}

#[test]
fn test_unrecognized_route_is_not_found() {
    assert_eq!(go("#/nowhere"), View::NotFound);
    assert_eq!(go("home"), View::NotFound);
}

#[test]
fn test_unknown_product_falls_back_to_first() {
    match go("#/product/doesnotexist") {
        View::Product(detail) => assert_eq!(detail.title, "RoboKit Junior"),
        other => panic!("expected product detail, got {other:?}"),
    }
    match go("#/product") {
        View::Product(detail) => assert_eq!(detail.id, "p1"),
        other => panic!("expected product detail, got {other:?}"),
    }
}

#[test]
fn test_known_product_detail() {
    match go("#/product/p8") {
        View::Product(detail) => {
            assert_eq!(detail.title, "MindBlocks");
            assert_eq!(detail.price, "$29.00");
        }
        other => panic!("expected product detail, got {other:?}"),
    }
}

#[test]
fn test_category_route_sets_filter() {
    let (mut storefront, _) = start_with(MemoryStorage::new(), "#/categories/Outdoor");
    assert_eq!(
        storefront.state().route(),
        &Route::Category(CategoryFilter::Only(Category::Outdoor))
    );
    match storefront.render().view {
        View::Category(view) => {
            assert_eq!(view.heading, "Outdoor");
            assert_eq!(view.products.len(), 2);
        }
        other => panic!("expected category view, got {other:?}"),
    }
}

#[test]
fn test_unknown_category_is_empty() {
    match go("#/categories/Robots") {
        View::Category(view) => {
            assert_eq!(view.heading, "Robots");
            assert!(view.products.is_empty());
        }
        other => panic!("expected category view, got {other:?}"),
    }
}

#[test]
fn test_navigation_closes_quick_view() {
    let (mut storefront, _) = start_with(MemoryStorage::new(), "#/home");
    storefront.handle(UiEvent::Click(ClickTarget::View("p3".into())));
    assert!(storefront.state().quick_view().is_some());
    storefront.handle(UiEvent::HashChange("#/about".to_string()));
    assert!(storefront.state().quick_view().is_none());
    let html = storefront.render_html().unwrap();
    assert!(!html.contains("id=\"productModal\""));
}

#[test]
fn test_escape_closes_quick_view() {
    let (mut storefront, _) = start_with(MemoryStorage::new(), "#/home");
    storefront.handle(UiEvent::Click(ClickTarget::View("p3".into())));
    storefront.handle(UiEvent::KeyDown("Escape".to_string()));
    assert!(storefront.state().quick_view().is_none());
}

#[test]
fn test_empty_initial_fragment_redirects() {
    let (storefront, outcome) = start_with(MemoryStorage::new(), "#");
    assert_eq!(outcome.navigate_to.as_deref(), Some("#/home"));
    assert_eq!(storefront.state().route(), &Route::Home);
}
