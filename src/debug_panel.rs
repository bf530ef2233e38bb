//! Developer debug panel.
//!
//! Lets a developer switch the search source and, while the simulated
//! source is active, pick one of its filenames as the search term.
//!
//! The transition logic lives in [`FilenamePanel`]; this module runs it
//! against the shared store and the tokio runtime:
//!
//! 1. [`DebugPanel::sync`] reads `current_search_source` and feeds it to the
//!    state machine.
//! 2. Entering `static` spawns a fetch through the [`FilenameLister`]. The
//!    previous fetch, if any, is aborted.
//! 3. The fetch result is applied only if its generation ticket is still
//!    current; stale results are logged at `debug` and dropped.
//! 4. Leaving `static` clears the list and aborts the in-flight fetch.
//!
//! The panel never caches the store: every operation looks it up through
//! the [`DataProvider`], so once the session unmounts it every call fails
//! with [`ConsoleError::StoreNotInitialized`].
//!
//! All methods that may start a fetch must be called from inside a tokio
//! runtime.

use anyhow::{bail, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

use search_console_core::layout::LayoutContext;
use search_console_core::panel::{FetchOutcome, FilenamePanel, PanelAction};
use search_console_core::{ConsoleError, DataContext, DataProvider, SearchSource};

use crate::navigation::SEARCH_ROUTE;
use crate::traits::{FilenameLister, Navigator, Notifier};

/// Acknowledgement shown after a filename becomes the search term.
pub const FILENAME_SELECTED_MESSAGE: &str = "Search query set successfully!";

/// One radio option in the source picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOption {
    pub value: SearchSource,
    pub label: &'static str,
    pub checked: bool,
}

/// Render model of a visible panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub current_source: SearchSource,
    pub options: Vec<SourceOption>,
    /// Present only while the simulated source is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filenames: Option<Vec<String>>,
    pub loading: bool,
}

/// The debug panel, bound to one store and its collaborators.
pub struct DebugPanel {
    provider: Arc<DataProvider>,
    layout: Arc<LayoutContext>,
    lister: Arc<dyn FilenameLister>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<FilenamePanel>>,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DebugPanel {
    /// Creates the panel and reacts to the store's current source, so a
    /// session that starts on `static` fetches immediately.
    ///
    /// Fails with [`ConsoleError::StoreNotInitialized`] if `provider` has
    /// nothing mounted.
    pub fn new(
        provider: Arc<DataProvider>,
        layout: Arc<LayoutContext>,
        lister: Arc<dyn FilenameLister>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConsoleError> {
        let panel = Self {
            provider,
            layout,
            lister,
            navigator,
            notifier,
            state: Arc::new(Mutex::new(FilenamePanel::new())),
            inflight: Mutex::new(None),
        };
        panel.sync()?;
        Ok(panel)
    }

    fn data(&self) -> Result<Arc<DataContext>, ConsoleError> {
        self.provider.use_data()
    }

    /// Brings the panel up to date with the store.
    pub fn sync(&self) -> Result<PanelAction, ConsoleError> {
        // Held across the read, observe and spawn so concurrent syncs see
        // the handle.
        let mut inflight = lock(&self.inflight);
        let source = self.data()?.current_search_source().get();
        let action = lock(&self.state).observe(source);
        match action {
            PanelAction::StartFetch(ticket) => {
                let lister = self.lister.clone();
                let state = self.state.clone();
                let handle = tokio::spawn(async move {
                    let result = lister
                        .fetch_filenames()
                        .await
                        .map_err(ConsoleError::fetch_failure);
                    let outcome = lock(&state).complete(ticket, result);
                    match outcome {
                        FetchOutcome::Loaded(count) => {
                            tracing::info!(count, "Filenames loaded successfully");
                        }
                        FetchOutcome::Failed(e) => {
                            tracing::error!(error = %e, "Error loading filenames");
                        }
                        FetchOutcome::Stale => {
                            tracing::debug!(
                                generation = ticket.value(),
                                "discarding stale filename fetch"
                            );
                        }
                    }
                });
                if let Some(previous) = inflight.replace(handle) {
                    previous.abort();
                }
            }
            PanelAction::Clear => {
                if let Some(previous) = inflight.take() {
                    previous.abort();
                }
            }
            PanelAction::None => {}
        }
        Ok(action)
    }

    /// Selects a search source, as the radio buttons do.
    pub fn select_source(&self, source: SearchSource) -> Result<PanelAction, ConsoleError> {
        self.data()?.current_search_source().set(source);
        self.sync()
    }

    /// Uses `filename` as the search term and moves to the search view.
    ///
    /// Only filenames the panel currently shows are clickable: the panel
    /// must be visible, the simulated source selected, and `filename` one
    /// of the loaded names. A missing store surfaces as a
    /// [`ConsoleError`] inside the returned error.
    pub fn click_filename(&self, filename: &str) -> Result<()> {
        let data = self.data()?;
        if !self.layout.is_debug_panel_visible() {
            bail!("debug panel is hidden");
        }
        let source = data.current_search_source().get();
        if !source.is_simulated() {
            bail!(
                "filenames are only listed for the static source (current: {})",
                source
            );
        }
        let listed = lock(&self.state)
            .filenames()
            .iter()
            .any(|name| name == filename);
        if !listed {
            bail!("{:?} is not one of the listed filenames", filename);
        }

        data.search_term().set(Some(filename.to_string()));
        self.navigator.navigate_to(SEARCH_ROUTE);
        self.notifier.notify(FILENAME_SELECTED_MESSAGE);
        Ok(())
    }

    /// Waits for the in-flight fetch, if any, to finish or be cancelled.
    pub async fn settle(&self) {
        let handle = lock(&self.inflight).take();
        if let Some(handle) = handle {
            // Cancelled fetches are expected here.
            let _ = handle.await;
        }
    }

    /// Re-syncs whenever another consumer changes the source.
    ///
    /// The task holds only a weak reference to the panel and exits once the
    /// panel or the store is gone.
    pub fn spawn_watcher(self: &Arc<Self>) -> Result<JoinHandle<()>, ConsoleError> {
        let mut rx = self.data()?.current_search_source().subscribe();
        let panel = Arc::downgrade(self);
        Ok(tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let Some(panel) = panel.upgrade() else {
                    break;
                };
                if panel.sync().is_err() {
                    break;
                }
            }
        }))
    }

    pub fn filenames(&self) -> Vec<String> {
        lock(&self.state).filenames().to_vec()
    }

    pub fn is_fetching(&self) -> bool {
        lock(&self.state).is_fetching()
    }

    pub fn fetches_started(&self) -> u64 {
        lock(&self.state).fetches_started()
    }

    /// Render model, or `None` while the layout hides the panel.
    pub fn view(&self) -> Result<Option<PanelView>, ConsoleError> {
        let current = self.data()?.current_search_source().get();
        if !self.layout.is_debug_panel_visible() {
            return Ok(None);
        }
        let state = lock(&self.state);
        let options = SearchSource::ALL
            .into_iter()
            .map(|source| SourceOption {
                value: source,
                label: source.label(),
                checked: source == current,
            })
            .collect();
        Ok(Some(PanelView {
            current_source: current,
            options,
            filenames: current
                .is_simulated()
                .then(|| state.filenames().to_vec()),
            loading: state.is_fetching(),
        }))
    }

    /// Plain-text rendering for terminals, or `None` while hidden.
    pub fn render_text(&self) -> Result<Option<String>, ConsoleError> {
        let Some(view) = self.view()? else {
            return Ok(None);
        };
        let mut out = String::from("Debug Panel\n");
        for option in &view.options {
            let mark = if option.checked { "x" } else { " " };
            out.push_str(&format!("  ({}) {} [{}]\n", mark, option.label, option.value));
        }
        if let Some(filenames) = &view.filenames {
            out.push_str("Filenames:\n");
            if filenames.is_empty() {
                let note = if view.loading { "loading..." } else { "none" };
                out.push_str(&format!("  ({})\n", note));
            }
            for name in filenames {
                out.push_str(&format!("  - {}\n", name));
            }
        }
        Ok(Some(out))
    }

    fn cancel_inflight(&self) {
        if let Some(handle) = lock(&self.inflight).take() {
            handle.abort();
        }
    }
}

impl Drop for DebugPanel {
    fn drop(&mut self) {
        self.cancel_inflight();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RouteTracker;
    use crate::notify::ToastQueue;
    use async_trait::async_trait;

    struct FixedLister(Vec<&'static str>);

    #[async_trait]
    impl FilenameLister for FixedLister {
        async fn fetch_filenames(&self) -> anyhow::Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn make_panel(source: SearchSource, visible: bool) -> DebugPanel {
        let provider = Arc::new(DataProvider::new());
        provider.mount_with(source).unwrap();
        DebugPanel::new(
            provider,
            Arc::new(LayoutContext::new(visible)),
            Arc::new(FixedLister(vec!["a.txt", "b.txt"])),
            Arc::new(RouteTracker::new()),
            Arc::new(ToastQueue::new()),
        )
        .unwrap()
    }

    fn search_term(panel: &DebugPanel) -> Option<String> {
        panel.data().unwrap().search_term().get()
    }

    #[tokio::test]
    async fn test_new_requires_mounted_store() {
        let result = DebugPanel::new(
            Arc::new(DataProvider::new()),
            Arc::new(LayoutContext::default()),
            Arc::new(FixedLister(vec![])),
            Arc::new(RouteTracker::new()),
            Arc::new(ToastQueue::new()),
        );
        assert_eq!(result.err(), Some(ConsoleError::StoreNotInitialized));
    }

    #[tokio::test]
    async fn test_view_marks_current_source() {
        let panel = make_panel(SearchSource::Ailab, true);
        let view = panel.view().unwrap().unwrap();
        let checked: Vec<SearchSource> = view
            .options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value)
            .collect();
        assert_eq!(checked, vec![SearchSource::Ailab]);
        assert!(view.filenames.is_none());
    }

    #[tokio::test]
    async fn test_hidden_panel_renders_nothing() {
        let panel = make_panel(SearchSource::Azure, false);
        assert!(panel.view().unwrap().is_none());
        assert!(panel.render_text().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_render_text_lists_filenames() {
        let panel = make_panel(SearchSource::Static, true);
        panel.settle().await;
        let text = panel.render_text().unwrap().unwrap();
        assert!(text.contains("(x) Use Simulated Data [static]"));
        assert!(text.contains("  - a.txt\n  - b.txt\n"));
    }

    #[tokio::test]
    async fn test_click_requires_static_source() {
        let panel = make_panel(SearchSource::Azure, true);
        assert!(panel.click_filename("a.txt").is_err());
        assert_eq!(search_term(&panel), None);
    }

    #[tokio::test]
    async fn test_click_requires_visible_panel() {
        let panel = make_panel(SearchSource::Static, false);
        panel.settle().await;
        assert!(panel.click_filename("a.txt").is_err());
        assert_eq!(search_term(&panel), None);
    }

    #[tokio::test]
    async fn test_click_requires_listed_filename() {
        let panel = make_panel(SearchSource::Static, true);
        // Still loading: nothing is listed yet.
        assert!(panel.click_filename("a.txt").is_err());
        panel.settle().await;

        let err = panel.click_filename("c.txt").unwrap_err();
        assert!(err.to_string().contains("c.txt"));
        assert_eq!(search_term(&panel), None);

        panel.click_filename("b.txt").unwrap();
        assert_eq!(search_term(&panel).as_deref(), Some("b.txt"));
    }
}
