//! Lumora Core - Shared domain types.
//!
//! This crate provides the domain model used across the Lumora components:
//! - `storefront` - Public-facing e-commerce site
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no HTTP
//! clients, no session handling. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product and price types
//! - [`cart`] - Ordered cart with merge-by-name semantics
//! - [`quickview`] - Quick-view modal state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod quickview;
pub mod types;

pub use cart::{Cart, CartLine};
pub use quickview::QuickView;
pub use types::*;
