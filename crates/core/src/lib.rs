//! ToyVerse Core - Shared types library.
//!
//! This crate provides common types used across the ToyVerse components:
//! - `storefront` - Catalog, cart, routing and rendering for the storefront
//! - `integration-tests` - End-to-end tests against the storefront API
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
