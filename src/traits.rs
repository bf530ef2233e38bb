//! Collaborator traits for the debug panel.
//!
//! The panel never talks to the network, the router, or the screen
//! directly. It calls out through these traits, so hosts (the HTTP
//! server, the CLI, tests) plug in whatever fits.
//!
//! | Trait | Role | Built-in implementation |
//! |-------|------|-------------------------|
//! | [`FilenameLister`] | lists simulated-dataset filenames | [`HttpFilenameLister`](crate::api::HttpFilenameLister) |
//! | [`Navigator`] | moves the user to another view | [`RouteTracker`](crate::navigation::RouteTracker) |
//! | [`Notifier`] | acknowledges a completed action | [`ToastQueue`](crate::notify::ToastQueue) |
//!
//! # Example
//!
//! ```rust
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use search_console::traits::FilenameLister;
//!
//! pub struct FixedFilenames(Vec<String>);
//!
//! #[async_trait]
//! impl FilenameLister for FixedFilenames {
//!     async fn fetch_filenames(&self) -> Result<Vec<String>> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;

/// Source of the simulated dataset's filenames.
///
/// Called on the tokio runtime, once per transition into the simulated
/// source. Errors are logged by the panel and never treated as fatal.
#[async_trait]
pub trait FilenameLister: Send + Sync {
    /// Returns every available filename, in display order.
    async fn fetch_filenames(&self) -> Result<Vec<String>>;
}

/// Fire-and-forget navigation.
pub trait Navigator: Send + Sync {
    /// Moves the user to `route` (e.g. `"/search"`).
    fn navigate_to(&self, route: &str);
}

/// Non-blocking acknowledgement shown to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
