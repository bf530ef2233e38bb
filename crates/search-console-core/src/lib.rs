//! # Search Console Core
//!
//! Shared, runtime-agnostic logic for Search Console: the search source
//! resolver, the shared search state store, the layout flags, and the
//! debug panel's filename state machine.
//!
//! This crate depends only on tokio's `sync` primitives (for `watch`
//! channels). It spawns no tasks and performs no I/O; the application
//! crate supplies the runtime, the HTTP name lister, and navigation.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`source`] | `SearchSource` parsing and the environment resolver |
//! | [`models`] | `QueryResult` and the `SearchState` snapshot |
//! | [`store`] | `Facet`, `DataContext`, and `DataProvider` |
//! | [`layout`] | Layout preferences (debug panel visibility) |
//! | [`generation`] | Generation counter used as a staleness guard |
//! | [`panel`] | Debug panel filename state machine |
//! | [`error`] | `ConsoleError` taxonomy |

pub mod error;
pub mod generation;
pub mod layout;
pub mod models;
pub mod panel;
pub mod source;
pub mod store;

pub use error::ConsoleError;
pub use models::{QueryResult, SearchState};
pub use source::{resolve_search_source, SearchSource, SEARCH_SOURCE_ENV};
pub use store::{DataContext, DataProvider, Facet};
