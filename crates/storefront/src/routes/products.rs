//! Product detail route handlers.
//!
//! Selecting a product remembers it in the session (the "active product"
//! key) before navigating, so the detail page renders without refetching
//! the feed. The stored value is best-effort: a direct visit or a corrupted
//! value falls back to a catalog lookup.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use lumora_core::types::Product;

use crate::error::Result;
use crate::filters;
use crate::models::session_keys;
use crate::routes::cart::CartView;
use crate::services::cart as cart_store;
use crate::state::AppState;

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub name: String,
    pub price: String,
    pub primary_photo: String,
    pub photos: Vec<String>,
    pub description: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            primary_photo: product.primary_photo().to_string(),
            photos: product.photos.clone(),
            description: product.description.clone().unwrap_or_default(),
        }
    }
}

/// Select product form data.
#[derive(Debug, Deserialize)]
pub struct SelectProductForm {
    pub name: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub cart: CartView,
}

/// Remember the selected product, then redirect to its detail page.
#[instrument(skip(state, session))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SelectProductForm>,
) -> Result<Redirect> {
    let product = state.catalog().get_product_by_name(&form.name).await?;
    session
        .insert(session_keys::ACTIVE_PRODUCT, &product)
        .await?;

    let location = format!("/products/{}", urlencoding::encode(&product.name));
    Ok(Redirect::to(&location))
}

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
) -> Result<ProductShowTemplate> {
    let remembered = match session.get::<Product>(session_keys::ACTIVE_PRODUCT).await {
        Ok(Some(product)) if product.name == name => Some(product),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Malformed active product in session: {e}");
            None
        }
    };

    let product = match remembered {
        Some(product) => product,
        None => state.catalog().get_product_by_name(&name).await?,
    };

    let cart = cart_store::load(&session).await;
    Ok(ProductShowTemplate {
        product: ProductDetailView::from(&product),
        cart: CartView::from(&cart),
    })
}

#[cfg(test)]
mod tests {
    use lumora_core::types::{PLACEHOLDER_IMAGE, Price};

    use super::*;

    #[test]
    fn test_detail_view_defaults() {
        let product = Product::new("Shirt".to_string(), Price::from_major_units(500.0));
        let view = ProductDetailView::from(&product);
        assert_eq!(view.primary_photo, PLACEHOLDER_IMAGE);
        assert!(view.description.is_empty());
        assert_eq!(view.price, "৳ 500");
    }
}
