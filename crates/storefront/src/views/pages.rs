//! Static pages.

use askama::Template;

/// About page template.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Not-found page template.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;
