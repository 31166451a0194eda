//! ElectroHome Core - Shared types library.
//!
//! This crate provides common types used across all ElectroHome components:
//! - `storefront` - Catalog, cart and admin stores plus their persistence
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product and cart data, type-safe IDs, prices and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
