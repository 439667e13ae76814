//! Core types for Lumora.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod price;
pub mod product;

pub use price::Price;
pub use product::{PLACEHOLDER_IMAGE, Product};
