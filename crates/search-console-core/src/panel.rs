//! Debug panel filename state machine.
//!
//! The panel follows `current_search_source` through three states
//! (`ailab`, `azure`, `static`). Only transitions matter:
//!
//! | Transition | Action |
//! |------------|--------|
//! | same source observed again | nothing |
//! | into `static` | start a filename fetch |
//! | out of `static`, or first observation of another source | clear the list |
//!
//! Fetch completions carry the [`Ticket`] captured when the fetch started.
//! A completion whose ticket is no longer current belongs to a state the
//! panel has already left and is discarded, so a slow fetch can never
//! repopulate the list after the user switched away from `static`.
//!
//! This type is pure: it decides, the caller performs the I/O.

use crate::error::ConsoleError;
use crate::generation::{Generation, Ticket};
use crate::source::SearchSource;

/// What the caller must do after a source observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Not a transition.
    None,
    /// Entered `static`: fetch filenames and report back with this ticket.
    StartFetch(Ticket),
    /// Left `static` (or started elsewhere): the list was cleared and any
    /// in-flight fetch should be cancelled.
    Clear,
}

/// How a fetch completion was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list now holds this many names.
    Loaded(usize),
    /// The fetch failed; the previous list was kept.
    Failed(ConsoleError),
    /// The panel moved on before the fetch finished; the result was dropped.
    Stale,
}

/// Panel-local filename cache driven by source transitions.
#[derive(Debug, Default)]
pub struct FilenamePanel {
    observed: Option<SearchSource>,
    filenames: Vec<String>,
    generation: Generation,
    pending: Option<Ticket>,
    fetches_started: u64,
}

impl FilenamePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the store's current source into the state machine.
    pub fn observe(&mut self, source: SearchSource) -> PanelAction {
        if self.observed == Some(source) {
            return PanelAction::None;
        }
        let previous = self.observed.replace(source);
        tracing::debug!(
            from = previous.map(SearchSource::as_str),
            to = source.as_str(),
            "debug panel source transition"
        );

        let ticket = self.generation.advance();
        if source.is_simulated() {
            self.pending = Some(ticket);
            self.fetches_started += 1;
            PanelAction::StartFetch(ticket)
        } else {
            self.pending = None;
            self.filenames.clear();
            PanelAction::Clear
        }
    }

    /// Applies a fetch result, unless it is stale.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<String>, ConsoleError>,
    ) -> FetchOutcome {
        if !self.generation.is_current(ticket) || self.pending != Some(ticket) {
            return FetchOutcome::Stale;
        }
        self.pending = None;
        match result {
            Ok(names) => {
                self.filenames = names;
                FetchOutcome::Loaded(self.filenames.len())
            }
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    /// Cached names, in the order the lister returned them.
    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Whether a fetch is outstanding for the current state.
    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// Total fetches started over the panel's lifetime.
    pub fn fetches_started(&self) -> u64 {
        self.fetches_started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn expect_fetch(action: PanelAction) -> Ticket {
        match action {
            PanelAction::StartFetch(ticket) => ticket,
            other => panic!("expected StartFetch, got {:?}", other),
        }
    }

    #[test]
    fn test_entering_static_starts_fetch() {
        let mut panel = FilenamePanel::new();
        assert_eq!(panel.observe(SearchSource::Azure), PanelAction::Clear);
        let ticket = expect_fetch(panel.observe(SearchSource::Static));
        assert!(panel.is_fetching());

        let outcome = panel.complete(ticket, Ok(names(&["a.txt", "b.txt"])));
        assert_eq!(outcome, FetchOutcome::Loaded(2));
        assert_eq!(panel.filenames(), &names(&["a.txt", "b.txt"])[..]);
        assert!(!panel.is_fetching());
    }

    #[test]
    fn test_starting_in_static_fetches_immediately() {
        let mut panel = FilenamePanel::new();
        expect_fetch(panel.observe(SearchSource::Static));
        assert_eq!(panel.fetches_started(), 1);
    }

    #[test]
    fn test_leaving_static_clears_list() {
        let mut panel = FilenamePanel::new();
        let ticket = expect_fetch(panel.observe(SearchSource::Static));
        panel.complete(ticket, Ok(names(&["a.txt"])));

        assert_eq!(panel.observe(SearchSource::Ailab), PanelAction::Clear);
        assert!(panel.filenames().is_empty());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut panel = FilenamePanel::new();
        let ticket = expect_fetch(panel.observe(SearchSource::Static));
        panel.observe(SearchSource::Azure);

        let outcome = panel.complete(ticket, Ok(names(&["a.txt", "b.txt"])));
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(panel.filenames().is_empty());
    }

    #[test]
    fn test_completion_from_earlier_static_visit_is_discarded() {
        let mut panel = FilenamePanel::new();
        let old = expect_fetch(panel.observe(SearchSource::Static));
        panel.observe(SearchSource::Azure);
        let fresh = expect_fetch(panel.observe(SearchSource::Static));

        assert_eq!(panel.complete(old, Ok(names(&["old.txt"]))), FetchOutcome::Stale);
        assert!(panel.is_fetching());
        assert_eq!(
            panel.complete(fresh, Ok(names(&["new.txt"]))),
            FetchOutcome::Loaded(1)
        );
        assert_eq!(panel.filenames(), &names(&["new.txt"])[..]);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_list() {
        let mut panel = FilenamePanel::new();
        let ticket = expect_fetch(panel.observe(SearchSource::Static));
        let err = ConsoleError::fetch_failure("503 Service Unavailable");

        let outcome = panel.complete(ticket, Err(err.clone()));
        assert_eq!(outcome, FetchOutcome::Failed(err));
        assert!(panel.filenames().is_empty());
        assert!(!panel.is_fetching());
    }

    #[test]
    fn test_same_source_twice_is_not_a_transition() {
        let mut panel = FilenamePanel::new();
        expect_fetch(panel.observe(SearchSource::Static));
        assert_eq!(panel.observe(SearchSource::Static), PanelAction::None);
        assert_eq!(panel.observe(SearchSource::Static), PanelAction::None);
        assert_eq!(panel.fetches_started(), 1);
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut panel = FilenamePanel::new();
        let ticket = expect_fetch(panel.observe(SearchSource::Static));
        panel.complete(ticket, Ok(names(&["a.txt"])));
        assert_eq!(
            panel.complete(ticket, Ok(names(&["b.txt"]))),
            FetchOutcome::Stale
        );
        assert_eq!(panel.filenames(), &names(&["a.txt"])[..]);
    }
}
