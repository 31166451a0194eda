//! ElectroHome storefront library.
//!
//! Catalog, cart and admin gate stores mirrored into a key-value backend,
//! plus the filter engine, the catalog editor and the checkout handoff.
//! Front ends drive everything through [`Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod search;
pub mod seed;
pub mod services;
pub mod state;
pub mod storage;

pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use state::Storefront;
