//! Route tracking for hosts without a real router.

use std::sync::atomic::{AtomicU64, Ordering};

use search_console_core::Facet;

use crate::traits::Navigator;

/// Route of the search results view.
pub const SEARCH_ROUTE: &str = "/search";

/// Route the session starts on.
pub const HOME_ROUTE: &str = "/";

/// [`Navigator`] that records the current route and counts navigations.
#[derive(Debug)]
pub struct RouteTracker {
    current: Facet<String>,
    navigations: AtomicU64,
}

impl RouteTracker {
    pub fn new() -> Self {
        Self {
            current: Facet::new(HOME_ROUTE.to_string()),
            navigations: AtomicU64::new(0),
        }
    }

    pub fn current_route(&self) -> String {
        self.current.get()
    }

    /// Number of `navigate_to` calls, including ones to the current route.
    pub fn navigation_count(&self) -> u64 {
        self.navigations.load(Ordering::SeqCst)
    }
}

impl Default for RouteTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for RouteTracker {
    fn navigate_to(&self, route: &str) {
        self.navigations.fetch_add(1, Ordering::SeqCst);
        self.current.set(route.to_string());
        tracing::info!(route, "navigated");
    }
}
