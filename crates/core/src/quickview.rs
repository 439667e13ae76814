//! Quick-view modal state machine.
//!
//! Phases: `Closed -> Opening -> Open -> Closing -> Closed`. The enter and
//! leave transitions complete after a presentation delay, so their
//! completions are delivered later as `finish_open` / `finish_close` calls.
//! Each transition start bumps a generation counter and completions carry
//! the generation they were scheduled under; a completion whose generation
//! no longer matches is stale and ignored. Re-opening on a second product
//! before the first open settles therefore always leaves the modal showing
//! the second product.

use crate::cart::Cart;
use crate::types::{PLACEHOLDER_IMAGE, Product};

/// Delay before an opening modal counts as fully open.
pub const OPEN_TRANSITION_MS: u64 = 400;
/// Fade-out delay before a closing modal leaves the interaction tree.
pub const CLOSE_TRANSITION_MS: u64 = 300;
/// Image crossfade duration when the carousel advances.
pub const CROSSFADE_MS: u64 = 200;
/// Minimum horizontal drag, in pixels, that counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Lifecycle phase of the quick-view modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Transient quick-view state for one visitor.
///
/// Never persisted; the storefront keeps it in a short-lived in-memory map
/// and discards it when the close transition completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickView {
    product: Product,
    images: Vec<String>,
    index: usize,
    draft_quantity: u32,
    phase: Phase,
    generation: u64,
}

impl QuickView {
    /// Open the modal on `product`.
    ///
    /// The image list comes from the product's photos, falling back to a
    /// single placeholder; index and draft quantity reset.
    #[must_use]
    pub fn open(product: Product) -> Self {
        let images = if product.photos.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            product.photos.clone()
        };
        Self {
            product,
            images,
            index: 0,
            draft_quantity: 1,
            phase: Phase::Opening,
            generation: 0,
        }
    }

    /// Re-open on a (possibly different) product from any phase.
    ///
    /// All transient state resets and the generation advances, so any
    /// completion still pending for the previous open becomes stale.
    pub fn reopen(&mut self, product: Product) {
        let generation = self.generation.wrapping_add(1);
        *self = Self::open(product);
        self.generation = generation;
    }

    /// Complete the open transition scheduled under `generation`.
    ///
    /// Returns whether the phase changed; stale generations are ignored.
    pub fn finish_open(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.phase == Phase::Opening {
            self.phase = Phase::Open;
            true
        } else {
            false
        }
    }

    /// Advance the carousel one image, wrapping at the end.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Retreat the carousel one image, wrapping at the start.
    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn step(&mut self, direction: isize) -> bool {
        if self.phase != Phase::Open || self.images.len() < 2 {
            return false;
        }
        let count = self.images.len() as isize;
        self.index = (self.index as isize + direction).rem_euclid(count) as usize;
        true
    }

    /// Jump to the thumbnail at `index`. Out-of-range is a no-op.
    pub fn select(&mut self, index: usize) -> bool {
        if self.phase != Phase::Open || index >= self.images.len() {
            return false;
        }
        self.index = index;
        true
    }

    /// Adjust the draft quantity, clamping to a minimum of one.
    pub fn change_quantity(&mut self, delta: i32) {
        let updated = i64::from(self.draft_quantity) + i64::from(delta);
        self.draft_quantity = u32::try_from(updated.max(1)).unwrap_or(u32::MAX);
    }

    /// Add the shown product at the draft quantity to `cart`.
    ///
    /// Only valid while fully open; returns whether the cart was touched.
    /// Feedback on the add button is the caller's display concern.
    pub fn commit_add(&self, cart: &mut Cart) -> bool {
        if self.phase != Phase::Open {
            return false;
        }
        cart.add(self.product.clone(), self.draft_quantity);
        true
    }

    /// Start the close transition.
    ///
    /// Returns the generation the completion must carry, or `None` when the
    /// modal is not open.
    pub fn close(&mut self) -> Option<u64> {
        if self.phase != Phase::Open {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Closing;
        Some(self.generation)
    }

    /// Complete the close transition scheduled under `generation`.
    ///
    /// Returns whether the modal reached `Closed`; the caller then discards
    /// this state. Stale generations are ignored.
    pub fn finish_close(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.phase == Phase::Closing {
            self.phase = Phase::Closed;
            true
        } else {
            false
        }
    }

    /// Apply a horizontal drag of `delta_x` pixels.
    ///
    /// Drags under [`SWIPE_THRESHOLD_PX`] do nothing; a rightward drag goes
    /// to the previous image, a leftward drag to the next.
    pub fn swipe(&mut self, delta_x: f64) -> bool {
        if self.phase != Phase::Open || delta_x.abs() < SWIPE_THRESHOLD_PX {
            return false;
        }
        if delta_x > 0.0 {
            self.previous()
        } else {
            self.next()
        }
    }

    /// The product shown in the modal.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Carousel images, never empty.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Current carousel position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The image at the current position.
    #[must_use]
    pub fn current_image(&self) -> &str {
        self.images
            .get(self.index)
            .map_or(PLACEHOLDER_IMAGE, String::as_str)
    }

    /// Quantity the add action will commit.
    #[must_use]
    pub const fn draft_quantity(&self) -> u32 {
        self.draft_quantity
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Generation of the most recent transition start.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
