//! Core types for ElectroHome.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts, plus the lenient JSON coercion shared by everything that reads
//! stored or imported data.

pub mod cart;
pub mod category;
pub mod coerce;
pub mod id;
pub mod price;
pub mod product;

pub use cart::CartLine;
pub use category::{Category, CategoryFilter};
pub use id::ProductId;
pub use price::Price;
pub use product::Product;
