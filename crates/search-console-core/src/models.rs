//! Data shared between the store and its consumers.

use serde::{Deserialize, Serialize};

use crate::source::SearchSource;

/// A single search hit as returned by a search backend.
///
/// The store treats these as opaque: it only holds and replaces whole
/// sequences of them and never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Backend-specific document identifier.
    pub id: String,
    /// Document title.
    #[serde(default)]
    pub title: Option<String>,
    /// Relevance score as reported by the backend.
    #[serde(default)]
    pub score: Option<f64>,
    /// Text excerpt.
    #[serde(default)]
    pub snippet: Option<String>,
    /// Web-browsable URL, if available.
    #[serde(default)]
    pub source_url: Option<String>,
    /// Anything else the backend attached.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

/// Point-in-time copy of every facet in a [`DataContext`](crate::store::DataContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Current query, `None` until one is set.
    pub search_term: Option<String>,
    /// Backend queries are routed to.
    pub current_search_source: SearchSource,
    /// Latest results, in backend order.
    pub query_result: Vec<QueryResult>,
}

impl SearchState {
    /// Fresh session state for the given source.
    pub fn new(source: SearchSource) -> Self {
        Self {
            search_term: None,
            current_search_source: source,
            query_result: Vec::new(),
        }
    }
}
