//! ToyVerse storefront library.
//!
//! A single-page toy shop: a fixed catalog, a filtered and sorted product
//! grid, a cart persisted to local storage, and hash-fragment routing. The
//! host (a browser shell or a test) owns the event loop and drives a
//! [`runtime::Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod filters;
pub mod pipeline;
pub mod router;
pub mod runtime;
pub mod state;
pub mod storage;
pub mod theme;
pub mod views;

pub use error::{AppError, Result};
pub use runtime::{Outcome, StartOptions, Storefront};
