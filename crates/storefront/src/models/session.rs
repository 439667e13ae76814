//! Session-related types.
//!
//! The session is the visitor's browser-scoped key-value store; everything
//! in it is best-effort and degrades to an empty/absent value when missing
//! or corrupted.

/// Session keys for visitor data.
pub mod keys {
    /// Key for the serialized cart (ordered line sequence).
    pub const CART: &str = "cart";

    /// Key for the product most recently selected for the detail page.
    pub const ACTIVE_PRODUCT: &str = "active_product";

    /// Marker key used to force session-id allocation for new visitors.
    pub const VISITOR: &str = "visitor";
}
