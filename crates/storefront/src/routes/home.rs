//! Home page and product grid route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use lumora_core::types::Product;

use crate::filters;
use crate::routes::cart::CartView;
use crate::services::cart as cart_store;
use crate::state::AppState;

/// Milliseconds between successive card entrance animations.
const STAGGER_MS: u64 = 150;

/// Product card display data for the grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub price: String,
    pub primary_photo: String,
    /// Pipe-joined photo list for the hover-cycling script.
    pub photos_attr: String,
    /// Whether the card has enough photos to cycle on hover.
    pub cycle_photos: bool,
    /// Entrance animation delay, proportional to grid position.
    pub stagger_ms: u64,
}

impl ProductCardView {
    fn new(index: usize, product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            primary_photo: product.primary_photo().to_string(),
            photos_attr: product.photos.join("|"),
            cycle_photos: product.photos.len() > 1,
            stagger_ms: u64::try_from(index).unwrap_or_default() * STAGGER_MS,
        }
    }
}

/// Home page template.
///
/// The grid itself is lazy-loaded so the page shows a loading indicator
/// while the catalog fetch is in flight.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cart: CartView,
}

/// Product grid fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductCardView>,
    /// Set when the feed could not be loaded; renders the inline error.
    pub failed: bool,
}

/// Display the home page.
#[instrument(skip(session))]
pub async fn home(session: Session) -> HomeTemplate {
    let cart = cart_store::load(&session).await;
    HomeTemplate {
        cart: CartView::from(&cart),
    }
}

/// Product grid fragment (HTMX).
///
/// A failed fetch is absorbed here: the fragment swaps in an inline
/// "refresh to retry" message instead of erroring the whole page.
#[instrument(skip(state))]
pub async fn grid(State(state): State<AppState>) -> ProductGridTemplate {
    match state.catalog().list_products().await {
        Ok(products) => ProductGridTemplate {
            products: products
                .iter()
                .enumerate()
                .map(|(index, product)| ProductCardView::new(index, product))
                .collect(),
            failed: false,
        },
        Err(e) => {
            tracing::error!("Failed to load catalog: {e}");
            ProductGridTemplate {
                products: Vec::new(),
                failed: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lumora_core::types::Price;

    use super::*;

    #[test]
    fn test_card_view_staggers_by_position() {
        let product = Product::new("Shirt".to_string(), Price::from_major_units(500.0));
        assert_eq!(ProductCardView::new(0, &product).stagger_ms, 0);
        assert_eq!(ProductCardView::new(3, &product).stagger_ms, 450);
    }

    #[test]
    fn test_card_view_cycle_requires_multiple_photos() {
        let mut product = Product::new("Shirt".to_string(), Price::from_major_units(500.0));
        product.photos = vec!["a.jpg".to_string()];
        assert!(!ProductCardView::new(0, &product).cycle_photos);

        product.photos.push("b.jpg".to_string());
        let card = ProductCardView::new(0, &product);
        assert!(card.cycle_photos);
        assert_eq!(card.photos_attr, "a.jpg|b.jpg");
    }
}
