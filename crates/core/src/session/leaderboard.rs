//! "Top recipes" leaderboard session.

use tracing::{debug, warn};

use crate::client::{LeaderboardEntry, RecipeService, RequestError};

use super::{LoadStatus, SessionId};

#[derive(Debug)]
pub struct LeaderboardSession {
    id: SessionId,
    status: LoadStatus<Vec<LeaderboardEntry>>,
    load_started: bool,
    closed: bool,
}

impl Default for LeaderboardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            status: LoadStatus::Loading,
            load_started: false,
            closed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> &LoadStatus<Vec<LeaderboardEntry>> {
        &self.status
    }

    /// Entries in service order; empty until loaded.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        self.status.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn begin_load(&mut self) -> bool {
        if self.closed || self.load_started {
            return false;
        }
        self.load_started = true;
        debug!(session = %self.id, "Loading leaderboard");
        true
    }

    pub fn complete_load(
        &mut self,
        session: SessionId,
        result: Result<Vec<LeaderboardEntry>, RequestError>,
    ) -> bool {
        if self.closed || session != self.id || !self.status.is_loading() {
            debug!(session = %session, "Discarding stale leaderboard load");
            return false;
        }

        self.status = match result {
            Ok(entries) => LoadStatus::Loaded(entries),
            Err(e) => {
                warn!(session = %self.id, error = %e, "Leaderboard load failed");
                LoadStatus::Failed(e)
            }
        };
        true
    }

    pub async fn load(&mut self, service: &dyn RecipeService) -> bool {
        if !self.begin_load() {
            return false;
        }
        let result = service.top_feedback().await;
        self.complete_load(self.id, result)
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}
