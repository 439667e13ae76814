//! Session-backed cart store.
//!
//! The in-memory [`Cart`] is the working copy; the session holds the
//! persisted copy under a fixed key. Every mutating route goes through the
//! same cycle: [`load`], mutate, [`persist`], re-render every cart surface.

use tower_sessions::Session;

use lumora_core::Cart;

use crate::models::session_keys;

/// Load the visitor's cart from the session.
///
/// A missing or malformed stored value yields an empty cart; corrupt state
/// must never take the page down.
pub async fn load(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("Malformed cart in session, starting empty: {e}");
            Cart::new()
        }
    }
}

/// Persist the full ordered cart to the session.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn persist(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use lumora_core::types::{Price, Product};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn shirt() -> Product {
        Product::new("Shirt".to_string(), Price::from_major_units(500.0))
    }

    #[tokio::test]
    async fn test_load_missing_cart_is_empty() {
        let session = session();
        let cart = load(&session).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_persist_then_load_round_trips() {
        let session = session();

        let mut cart = Cart::new();
        cart.add(shirt(), 2);
        persist(&session, &cart).await.unwrap();

        let loaded = load(&session).await;
        assert_eq!(loaded, cart);
    }

    #[tokio::test]
    async fn test_malformed_stored_cart_degrades_to_empty() {
        let session = session();
        session
            .insert(session_keys::CART, "definitely not a cart")
            .await
            .unwrap();

        let cart = load(&session).await;
        assert!(cart.is_empty());
    }
}
