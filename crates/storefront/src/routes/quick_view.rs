//! Quick-view modal route handlers.
//!
//! The modal state lives in [`crate::state::AppState::quick_views`], keyed
//! by session id - transient by design, discarded when the close transition
//! completes. Open and close settle after a presentation delay: the
//! rendered fragment schedules a completion request carrying the generation
//! it was issued under, and the state machine ignores completions whose
//! generation is stale. Opening product B while product A's completion is
//! still pending therefore always ends up showing B.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use lumora_core::QuickView;
use lumora_core::quickview::{CLOSE_TRANSITION_MS, OPEN_TRANSITION_MS, Phase};
use lumora_core::types::Product;

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::routes::cart::{CartSurfacesTemplate, CartView};
use crate::services::cart as cart_store;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Carousel display data (main image + thumbnail strip).
#[derive(Clone)]
pub struct QuickViewMediaView {
    pub name: String,
    pub images: Vec<String>,
    pub index: usize,
    pub current: String,
}

impl QuickViewMediaView {
    fn new(qv: &QuickView) -> Self {
        Self {
            name: qv.product().name.clone(),
            images: qv.images().to_vec(),
            index: qv.index(),
            current: qv.current_image().to_string(),
        }
    }
}

/// Product info display data for the modal.
#[derive(Clone)]
pub struct QuickViewInfoView {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl QuickViewInfoView {
    fn new(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Open modal form data.
#[derive(Debug, Deserialize)]
pub struct OpenForm {
    pub name: String,
}

/// Transition completion form data.
#[derive(Debug, Deserialize)]
pub struct GenerationForm {
    pub generation: u64,
}

/// Thumbnail selection form data.
#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub index: usize,
}

/// Draft quantity adjustment form data.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub delta: i32,
}

/// Swipe gesture form data (horizontal drag distance in pixels).
#[derive(Debug, Deserialize)]
pub struct SwipeForm {
    pub delta_x: f64,
}

// =============================================================================
// Templates
// =============================================================================

/// Full modal fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub media: QuickViewMediaView,
    pub info: QuickViewInfoView,
    pub quantity: u32,
    pub generation: u64,
    pub closing: bool,
    pub open_ms: u64,
    pub close_ms: u64,
}

impl QuickViewTemplate {
    fn for_state(qv: &QuickView) -> Self {
        Self {
            media: QuickViewMediaView::new(qv),
            info: QuickViewInfoView::new(qv.product()),
            quantity: qv.draft_quantity(),
            generation: qv.generation(),
            closing: qv.phase() == Phase::Closing,
            open_ms: OPEN_TRANSITION_MS,
            close_ms: CLOSE_TRANSITION_MS,
        }
    }
}

/// Carousel fragment template (image + thumbnails).
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view_media.html")]
pub struct QuickViewMediaTemplate {
    pub media: QuickViewMediaView,
}

/// Draft quantity fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view_qty.html")]
pub struct QuickViewQtyTemplate {
    pub quantity: u32,
}

/// Modal add button fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view_add.html")]
pub struct QuickViewAddTemplate {
    pub confirmed: bool,
}

// =============================================================================
// Session helpers
// =============================================================================

/// Stable key for this visitor's transient modal state.
///
/// First-time visitors have no session id until something is saved, so
/// this writes a marker and saves before reading the id.
async fn visitor_key(session: &Session) -> Result<String> {
    if let Some(id) = session.id() {
        return Ok(id.to_string());
    }
    session.insert(session_keys::VISITOR, true).await?;
    session.save().await?;
    session
        .id()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::Internal("session id unavailable after save".to_string()))
}

/// Look up the live modal state for this visitor, if any.
fn existing(state: &AppState, session: &Session) -> Option<(String, QuickView)> {
    let key = session.id()?.to_string();
    let qv = state.quick_views().get(&key)?;
    Some((key, qv))
}

/// Run a carousel operation and re-render the media fragment if it acted.
///
/// Operations on an absent or expired modal answer 204: the surface stays
/// as it is, nothing errors.
fn carousel(
    state: &AppState,
    session: &Session,
    op: impl FnOnce(&mut QuickView) -> bool,
) -> Response {
    let Some((key, mut qv)) = existing(state, session) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    if op(&mut qv) {
        state.quick_views().insert(key, qv.clone());
        QuickViewMediaTemplate {
            media: QuickViewMediaView::new(&qv),
        }
        .into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Open the modal on a product (HTMX).
///
/// Re-opening replaces any previous modal state wholesale; the bumped
/// generation strands every completion still pending for it.
#[instrument(skip(state, session))]
pub async fn open(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OpenForm>,
) -> Result<QuickViewTemplate> {
    let product = state.catalog().get_product_by_name(&form.name).await?;
    let key = visitor_key(&session).await?;

    let qv = match state.quick_views().get(&key) {
        Some(mut qv) => {
            qv.reopen(product);
            qv
        }
        None => QuickView::open(product),
    };
    state.quick_views().insert(key, qv.clone());

    Ok(QuickViewTemplate::for_state(&qv))
}

/// Open transition completion (HTMX, scheduled by the modal fragment).
#[instrument(skip(state, session))]
pub async fn opened(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GenerationForm>,
) -> StatusCode {
    if let Some((key, mut qv)) = existing(&state, &session)
        && qv.finish_open(form.generation)
    {
        state.quick_views().insert(key, qv);
    }
    StatusCode::NO_CONTENT
}

/// Advance the carousel (HTMX).
#[instrument(skip(state, session))]
pub async fn next(State(state): State<AppState>, session: Session) -> Response {
    carousel(&state, &session, QuickView::next)
}

/// Retreat the carousel (HTMX).
#[instrument(skip(state, session))]
pub async fn previous(State(state): State<AppState>, session: Session) -> Response {
    carousel(&state, &session, QuickView::previous)
}

/// Jump to a thumbnail (HTMX).
#[instrument(skip(state, session))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SelectForm>,
) -> Response {
    carousel(&state, &session, |qv| qv.select(form.index))
}

/// Apply a horizontal drag on the image area (HTMX).
///
/// The threshold lives in the state machine; drags that are too short
/// answer 204 and move nothing.
#[instrument(skip(state, session))]
pub async fn swipe(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SwipeForm>,
) -> Response {
    carousel(&state, &session, |qv| qv.swipe(form.delta_x))
}

/// Adjust the draft quantity (HTMX).
#[instrument(skip(state, session))]
pub async fn quantity(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<QuantityForm>,
) -> Response {
    let Some((key, mut qv)) = existing(&state, &session) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    qv.change_quantity(form.delta);
    let quantity = qv.draft_quantity();
    state.quick_views().insert(key, qv);

    QuickViewQtyTemplate { quantity }.into_response()
}

/// Commit the draft to the cart (HTMX).
///
/// Responds with the confirmed add button plus all cart surfaces
/// out-of-band; the persisted cart and every surface update in one pass.
#[instrument(skip(state, session))]
pub async fn add(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some((_, qv)) = existing(&state, &session) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let mut cart = cart_store::load(&session).await;
    if !qv.commit_add(&mut cart) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    cart_store::persist(&session, &cart).await?;

    let button = QuickViewAddTemplate { confirmed: true }.render()?;
    let oob_surfaces = CartSurfacesTemplate {
        cart: CartView::from(&cart),
    }
    .render()?;
    Ok(Html(format!("{button}{oob_surfaces}")).into_response())
}

/// Re-render the modal add button in its resting state (feedback revert).
#[instrument]
pub async fn add_button() -> QuickViewAddTemplate {
    QuickViewAddTemplate { confirmed: false }
}

/// Start the fade-out (HTMX).
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Response {
    let Some((key, mut qv)) = existing(&state, &session) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    if qv.close().is_none() {
        return StatusCode::NO_CONTENT.into_response();
    }
    state.quick_views().insert(key, qv.clone());

    QuickViewTemplate::for_state(&qv).into_response()
}

/// Close transition completion (HTMX, scheduled by the closing fragment).
///
/// Empties the modal container, removing it from the interaction tree, and
/// discards the visitor's modal state.
#[instrument(skip(state, session))]
pub async fn closed(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GenerationForm>,
) -> Response {
    let Some((key, mut qv)) = existing(&state, &session) else {
        return Html(String::new()).into_response();
    };
    if qv.finish_close(form.generation) {
        state.quick_views().invalidate(&key);
        Html(String::new()).into_response()
    } else {
        // Stale completion - a newer open owns the modal now
        StatusCode::NO_CONTENT.into_response()
    }
}
