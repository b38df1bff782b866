//! Search view session.

use tracing::{debug, warn};

use crate::client::{Query, RecipeService, RecipeSummary, RequestError};

use super::SessionId;

/// Lifecycle of the search view.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Searching,
    Ready,
    Failed(RequestError),
}

/// Handle for one in-flight search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    session: SessionId,
    seq: u64,
    query: Query,
}

impl SearchTicket {
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Query snapshot taken when the search was started.
    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// State of the search/home view.
#[derive(Debug)]
pub struct SearchSession {
    id: SessionId,
    query: Query,
    status: SearchStatus,
    results: Vec<RecipeSummary>,
    seq: u64,
    closed: bool,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            query: Query::default(),
            status: SearchStatus::Idle,
            results: Vec::new(),
            seq: 0,
            closed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn results(&self) -> &[RecipeSummary] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.status == SearchStatus::Searching
    }

    pub fn update_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    pub fn toggle_healthy(&mut self) {
        self.query.healthy_only = !self.query.healthy_only;
    }

    /// Start a search if one is allowed.
    ///
    /// Returns `None` (and changes nothing) for empty query text, while another
    /// search is in flight, or after the session was closed.
    pub fn begin_submit(&mut self) -> Option<SearchTicket> {
        if self.closed || self.query.is_empty() || self.is_searching() {
            return None;
        }

        self.seq += 1;
        self.status = SearchStatus::Searching;
        self.results.clear();

        debug!(
            session = %self.id,
            query = %self.query.text,
            healthy = self.query.healthy_only,
            "Search started"
        );

        Some(SearchTicket {
            session: self.id,
            seq: self.seq,
            query: self.query.clone(),
        })
    }

    /// Apply the outcome of a search.
    ///
    /// Returns `false` when the ticket does not belong to the live request of
    /// this session; the outcome is then discarded.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<RecipeSummary>, RequestError>,
    ) -> bool {
        if self.closed
            || ticket.session != self.id
            || ticket.seq != self.seq
            || !self.is_searching()
        {
            debug!(session = %ticket.session, "Discarding stale search result");
            return false;
        }

        match result {
            Ok(results) => {
                debug!(session = %self.id, results = results.len(), "Search ready");
                self.results = results;
                self.status = SearchStatus::Ready;
            }
            Err(e) => {
                warn!(session = %self.id, error = %e, "Search failed");
                self.status = SearchStatus::Failed(e);
            }
        }
        true
    }

    /// Run a search against `service` to completion.
    ///
    /// Returns whether a request was issued.
    pub async fn submit(&mut self, service: &dyn RecipeService) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let result = service.search(ticket.query()).await;
        self.complete(ticket, result);
        true
    }

    /// Tear the session down; later outcomes are ignored.
    pub fn close(&mut self) {
        self.closed = true;
    }
}
