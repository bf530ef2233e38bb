//! Application entry wiring.
//!
//! A [`Session`] is built once per process. It mounts the search state
//! store, creates the layout and collaborators, and hands every component
//! the same `Arc`s. Nothing in the crate reaches the store through a
//! global.

use std::sync::Arc;

use search_console_core::layout::LayoutContext;
use search_console_core::{ConsoleError, DataContext, DataProvider, SearchSource};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::debug_panel::DebugPanel;
use crate::navigation::RouteTracker;
use crate::notify::ToastQueue;
use crate::traits::FilenameLister;

/// Everything a host needs to serve one search session.
pub struct Session {
    provider: Arc<DataProvider>,
    pub layout: Arc<LayoutContext>,
    pub routes: Arc<RouteTracker>,
    pub toasts: Arc<ToastQueue>,
    pub panel: Arc<DebugPanel>,
    watcher: JoinHandle<()>,
}

impl Session {
    /// Starts a session with the source named by `SCON_SEARCH_SOURCE`.
    ///
    /// An unrecognized value is returned as
    /// [`ConsoleError::InvalidConfiguration`]; the caller must abort.
    pub fn from_env(config: &Config, lister: Arc<dyn FilenameLister>) -> Result<Self, ConsoleError> {
        let provider = Arc::new(DataProvider::new());
        provider.mount_from_env()?;
        Self::start(config, provider, lister)
    }

    /// Starts a session on an explicit source. Must run inside a tokio runtime.
    pub fn new(
        config: &Config,
        source: SearchSource,
        lister: Arc<dyn FilenameLister>,
    ) -> Result<Self, ConsoleError> {
        let provider = Arc::new(DataProvider::new());
        provider.mount_with(source)?;
        Self::start(config, provider, lister)
    }

    fn start(
        config: &Config,
        provider: Arc<DataProvider>,
        lister: Arc<dyn FilenameLister>,
    ) -> Result<Self, ConsoleError> {
        let layout = Arc::new(LayoutContext::new(config.layout.debug_panel_visible));
        let routes = Arc::new(RouteTracker::new());
        let toasts = Arc::new(ToastQueue::new());
        let panel = Arc::new(DebugPanel::new(
            provider.clone(),
            layout.clone(),
            lister,
            routes.clone(),
            toasts.clone(),
        )?);
        let watcher = panel.spawn_watcher()?;

        let source = provider.use_data()?.current_search_source().get();
        tracing::info!(%source, "search session started");
        Ok(Self {
            provider,
            layout,
            routes,
            toasts,
            panel,
            watcher,
        })
    }

    /// The mounted store, or [`ConsoleError::StoreNotInitialized`] after
    /// [`shutdown`](Session::shutdown).
    pub fn data(&self) -> Result<Arc<DataContext>, ConsoleError> {
        self.provider.use_data()
    }

    /// Ends the store's lifetime and stops the panel watcher. Later panel
    /// operations fail with [`ConsoleError::StoreNotInitialized`].
    pub fn shutdown(&self) {
        self.watcher.abort();
        if self.provider.unmount().is_some() {
            tracing::info!("search session ended");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
