//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation responds with one fragment that re-renders ALL cart
//! surfaces (main list, mini list, both totals, badge count) via
//! out-of-band swaps, so no surface is left showing pre-mutation state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use lumora_core::types::Price;
use lumora_core::{Cart, CartLine};

use crate::error::Result;
use crate::filters;
use crate::services::cart as cart_store;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub index: usize,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl CartItemView {
    fn new(index: usize, line: &CartLine) -> Self {
        Self {
            index,
            name: line.product.name.clone(),
            image: line.product.primary_photo().to_string(),
            unit_price: line.product.price.to_string(),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
///
/// A pure projection of the cart: rendering it twice for the same cart
/// yields identical output.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Price::ZERO.to_string(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartItemView::new(index, line))
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    pub quantity: Option<u32>,
}

/// Change quantity form data (signed delta).
#[derive(Debug, Deserialize)]
pub struct ChangeQuantityForm {
    pub index: usize,
    pub delta: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Clear cart form data.
///
/// The confirmation field is required: a clear request without it is a
/// no-op, so a mis-fired request can never wipe the cart.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    pub confirmed: Option<bool>,
}

/// Query for re-rendering a grid add button after the feedback delay.
#[derive(Debug, Deserialize)]
pub struct AddButtonQuery {
    pub name: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// All cart surfaces in one fragment (HTMX out-of-band swaps).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_surfaces.html")]
pub struct CartSurfacesTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
    pub oob: bool,
}

/// Add-to-cart button fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/add_button.html")]
pub struct AddButtonTemplate {
    pub name: String,
    pub confirmed: bool,
}

/// Render every cart surface for the current cart state.
fn surfaces(cart: &Cart) -> Result<Html<String>> {
    let fragment = CartSurfacesTemplate {
        cart: CartView::from(cart),
    }
    .render()?;
    Ok(Html(fragment))
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> CartShowTemplate {
    let cart = cart_store::load(&session).await;
    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add a product to the cart (HTMX).
///
/// Returns the confirmed add button for the triggering form plus all cart
/// surfaces out-of-band.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Html<String>> {
    let product = state.catalog().get_product_by_name(&form.name).await?;

    let mut cart = cart_store::load(&session).await;
    cart.add(product, form.quantity.unwrap_or(1));
    cart_store::persist(&session, &cart).await?;

    let button = AddButtonTemplate {
        name: form.name,
        confirmed: true,
    }
    .render()?;
    let oob_surfaces = CartSurfacesTemplate {
        cart: CartView::from(&cart),
    }
    .render()?;
    Ok(Html(format!("{button}{oob_surfaces}")))
}

/// Re-render a grid add button in its resting state (feedback revert).
#[instrument]
pub async fn add_button(Query(query): Query<AddButtonQuery>) -> AddButtonTemplate {
    AddButtonTemplate {
        name: query.name,
        confirmed: false,
    }
}

/// Change a cart line quantity by a signed delta (HTMX).
///
/// Driving the quantity to zero or below removes the line. Stale indices
/// are a no-op; the response still re-renders every surface.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<ChangeQuantityForm>,
) -> Result<Html<String>> {
    let mut cart = cart_store::load(&session).await;
    cart.change_quantity(form.index, form.delta);
    cart_store::persist(&session, &cart).await?;
    surfaces(&cart)
}

/// Remove a cart line by index (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Html<String>> {
    let mut cart = cart_store::load(&session).await;
    cart.remove(form.index);
    cart_store::persist(&session, &cart).await?;
    surfaces(&cart)
}

/// Clear the cart (HTMX).
///
/// Only acts when the visitor confirmed; declining leaves the cart
/// untouched and simply re-renders the current state.
#[instrument(skip(session))]
pub async fn clear(session: Session, Form(form): Form<ClearCartForm>) -> Result<Html<String>> {
    let mut cart = cart_store::load(&session).await;
    if form.confirmed == Some(true) {
        cart.clear();
        cart_store::persist(&session, &cart).await?;
    } else {
        tracing::debug!("Clear cart request without confirmation, ignoring");
    }
    surfaces(&cart)
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    let cart = cart_store::load(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
        oob: false,
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use lumora_core::types::Product;

    use super::*;

    fn product(name: &str, price: f64, photos: &[&str]) -> Product {
        let mut product = Product::new(name.to_string(), Price::from_major_units(price));
        product.photos = photos.iter().map(ToString::to_string).collect();
        product
    }

    #[test]
    fn test_empty_cart_view_has_zero_totals() {
        let view = CartView::from(&Cart::new());
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.total, "৳ 0");
    }

    #[test]
    fn test_cart_view_computes_line_totals_and_indices() {
        let mut cart = Cart::new();
        cart.add(product("Shirt", 500.0, &["a.jpg"]), 2);
        cart.add(product("Scarf", 250.0, &[]), 1);

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "৳ 1250");

        let first = &view.items[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.name, "Shirt");
        assert_eq!(first.image, "a.jpg");
        assert_eq!(first.unit_price, "৳ 500");
        assert_eq!(first.line_total, "৳ 1000");

        // No-photo products fall back to the placeholder
        assert_eq!(
            view.items[1].image,
            lumora_core::types::PLACEHOLDER_IMAGE
        );
    }

    #[test]
    fn test_cart_view_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(product("Shirt", 500.0, &[]), 2);

        let a = CartView::from(&cart);
        let b = CartView::from(&cart);
        assert_eq!(a.total, b.total);
        assert_eq!(a.item_count, b.item_count);
        assert_eq!(a.items.len(), b.items.len());
    }
}
