//! Layout preferences owned by the host.
//!
//! The debug panel only reads these; the host decides when to flip them.

use tokio::sync::watch;

use crate::store::Facet;

/// UI preferences shared with the debug panel.
#[derive(Debug)]
pub struct LayoutContext {
    debug_panel_visible: Facet<bool>,
}

impl LayoutContext {
    pub fn new(debug_panel_visible: bool) -> Self {
        Self {
            debug_panel_visible: Facet::new(debug_panel_visible),
        }
    }

    pub fn is_debug_panel_visible(&self) -> bool {
        self.debug_panel_visible.get()
    }

    pub fn set_debug_panel_visible(&self, visible: bool) -> bool {
        self.debug_panel_visible.set(visible)
    }

    /// Flips visibility and returns the new value.
    pub fn toggle_debug_panel(&self) -> bool {
        self.debug_panel_visible.update(|visible| !visible);
        self.debug_panel_visible.get()
    }

    pub fn subscribe_debug_panel_visible(&self) -> watch::Receiver<bool> {
        self.debug_panel_visible.subscribe()
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new(true)
    }
}
