//! Shared search state store.
//!
//! A [`DataContext`] holds the three facets every search component shares:
//!
//! | Facet | Type | Initial value |
//! |-------|------|---------------|
//! | [`search_term`](DataContext::search_term) | `Option<String>` | `None` |
//! | [`current_search_source`](DataContext::current_search_source) | [`SearchSource`] | resolved from configuration |
//! | [`query_result`](DataContext::query_result) | `Vec<QueryResult>` | empty |
//!
//! Each facet is replaced wholesale; there is no merging and no validation
//! of the values written.
//!
//! The context is owned by a [`DataProvider`], which is created once at
//! application entry and handed to every component that needs the store.
//! Reading through a provider that has not been mounted fails with
//! [`ConsoleError::StoreNotInitialized`].

mod facet;

pub use facet::Facet;

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ConsoleError;
use crate::models::{QueryResult, SearchState};
use crate::source::{resolve_search_source, SearchSource};

/// The session-lifetime search state.
#[derive(Debug)]
pub struct DataContext {
    search_term: Facet<Option<String>>,
    current_search_source: Facet<SearchSource>,
    query_result: Facet<Vec<QueryResult>>,
}

impl DataContext {
    /// Creates a context starting at `source`, with no term and no results.
    pub fn new(source: SearchSource) -> Self {
        Self {
            search_term: Facet::new(None),
            current_search_source: Facet::new(source),
            query_result: Facet::new(Vec::new()),
        }
    }

    /// Creates a context whose source is resolved from a configuration value.
    ///
    /// Fails with [`ConsoleError::InvalidConfiguration`] if the value names
    /// no known source.
    pub fn from_env_value(env_value: Option<&str>) -> Result<Self, ConsoleError> {
        Ok(Self::new(resolve_search_source(env_value)?))
    }

    pub fn search_term(&self) -> &Facet<Option<String>> {
        &self.search_term
    }

    pub fn current_search_source(&self) -> &Facet<SearchSource> {
        &self.current_search_source
    }

    pub fn query_result(&self) -> &Facet<Vec<QueryResult>> {
        &self.query_result
    }

    /// Copies every facet into a [`SearchState`].
    pub fn snapshot(&self) -> SearchState {
        SearchState {
            search_term: self.search_term.get(),
            current_search_source: self.current_search_source.get(),
            query_result: self.query_result.get(),
        }
    }
}

/// Owner of the session's [`DataContext`].
///
/// The provider itself is cheap and always valid; the context inside it
/// exists only between [`mount`](DataProvider::mount) and
/// [`unmount`](DataProvider::unmount).
#[derive(Debug, Default)]
pub struct DataProvider {
    slot: RwLock<Option<Arc<DataContext>>>,
}

impl DataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the context, seeding the source from `env_value`.
    ///
    /// Resolution errors are returned unchanged and leave the provider
    /// unmounted; callers are expected to abort startup on them.
    pub fn mount(&self, env_value: Option<&str>) -> Result<Arc<DataContext>, ConsoleError> {
        let source = resolve_search_source(env_value)?;
        self.mount_with(source)
    }

    /// Like [`mount`](DataProvider::mount), reading the value from
    /// [`SEARCH_SOURCE_ENV`](crate::source::SEARCH_SOURCE_ENV).
    pub fn mount_from_env(&self) -> Result<Arc<DataContext>, ConsoleError> {
        self.mount_with(SearchSource::from_env()?)
    }

    /// Builds the context with an already resolved source.
    pub fn mount_with(&self, source: SearchSource) -> Result<Arc<DataContext>, ConsoleError> {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(ConsoleError::StoreAlreadyMounted);
        }
        let context = Arc::new(DataContext::new(source));
        tracing::debug!(%source, "search state store mounted");
        *slot = Some(context.clone());
        Ok(context)
    }

    /// Returns the mounted context.
    pub fn use_data(&self) -> Result<Arc<DataContext>, ConsoleError> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ConsoleError::StoreNotInitialized)
    }

    /// Ends the store's lifetime. Every later [`use_data`](DataProvider::use_data)
    /// fails with [`ConsoleError::StoreNotInitialized`], so consumers must
    /// look the context up per operation rather than caching the `Arc`.
    pub fn unmount(&self) -> Option<Arc<DataContext>> {
        let previous = self
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::debug!("search state store unmounted");
        }
        previous
    }

    pub fn is_mounted(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
