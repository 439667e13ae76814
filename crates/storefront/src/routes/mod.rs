//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Product grid page
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /products/grid           - Product grid fragment (HTMX, lazy-loaded)
//! POST /products/select         - Remember selection, redirect to detail
//! GET  /products/{name}         - Product detail page
//!
//! # Cart (HTMX fragments; every mutation re-renders all surfaces OOB)
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add product by name
//! GET  /cart/add-button         - Add button fragment (feedback revert)
//! POST /cart/update             - Change line quantity by signed delta
//! POST /cart/remove             - Remove line by index
//! POST /cart/clear              - Clear cart (requires confirmation field)
//! GET  /cart/count              - Cart count badge (fragment)
//!
//! # Quick view (HTMX fragments)
//! POST /quick-view/open         - Open modal on a product
//! POST /quick-view/opened       - Open transition completion (generation)
//! POST /quick-view/next         - Advance carousel
//! POST /quick-view/prev         - Retreat carousel
//! POST /quick-view/select       - Jump to thumbnail by index
//! POST /quick-view/swipe        - Horizontal drag on the image area
//! POST /quick-view/quantity     - Adjust draft quantity by delta
//! POST /quick-view/add          - Commit add to cart
//! GET  /quick-view/add-button   - Add button fragment (feedback revert)
//! POST /quick-view/close        - Start fade-out
//! POST /quick-view/closed       - Close transition completion (generation)
//! ```

pub mod cart;
pub mod home;
pub mod products;
pub mod quick_view;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog feed.
async fn health() -> &'static str {
    "ok"
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/grid", get(home::grid))
        .route("/select", post(products::select))
        .route("/{name}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/add-button", get(cart::add_button))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the quick-view routes router.
pub fn quick_view_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(quick_view::open))
        .route("/opened", post(quick_view::opened))
        .route("/next", post(quick_view::next))
        .route("/prev", post(quick_view::previous))
        .route("/select", post(quick_view::select))
        .route("/swipe", post(quick_view::swipe))
        .route("/quantity", post(quick_view::quantity))
        .route("/add", post(quick_view::add))
        .route("/add-button", get(quick_view::add_button))
        .route("/close", post(quick_view::close))
        .route("/closed", post(quick_view::closed))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/quick-view", quick_view_routes())
}
