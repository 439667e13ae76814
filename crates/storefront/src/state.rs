//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use lumora_core::QuickView;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;

/// How long an untouched quick-view controller survives before eviction.
const QUICK_VIEW_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on concurrently tracked quick-view controllers.
const QUICK_VIEW_CAPACITY: u64 = 10_000;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    /// Transient per-visitor quick-view state, keyed by session id.
    ///
    /// Deliberately not in the session store: the modal state is discarded
    /// on close and must not outlive the visit.
    quick_views: Cache<String, QuickView>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(config.catalog_url.clone());
        let quick_views = Cache::builder()
            .max_capacity(QUICK_VIEW_CAPACITY)
            .time_to_live(QUICK_VIEW_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                quick_views,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog feed client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the quick-view controller map.
    #[must_use]
    pub fn quick_views(&self) -> &Cache<String, QuickView> {
        &self.inner.quick_views
    }
}
