//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Product list: create, edit, delete, import/export
//! - `cart` - Cart lines, quantities and totals
//! - `auth` - Admin gate unlocking the editor
//! - `editor` - Draft products committed into the catalog
//! - `checkout` - Order message and messaging deep link

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod editor;
