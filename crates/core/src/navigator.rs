//! View navigation.
//!
//! The navigator owns the single live session. Navigating tears the current
//! session down and creates a fresh one for the target view. Service calls
//! run as spawned tasks and report back through one event channel, which is
//! also where deferred redirects arrive. Events are applied on the caller's
//! task via `handle`, and only if they belong to the live session.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::client::{RecipeId, RecipeService};
use crate::session::{
    FeedbackState, LeaderboardSession, RecipeDetailSession, Redirector, SearchSession,
    SessionEvent, SessionId,
};

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Session event channel closed")]
    ChannelClosed,
}

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Search entry point (home).
    Search,
    /// Detail of one recipe, opened from a search for `origin_query`.
    Recipe { id: RecipeId, origin_query: String },
    Leaderboard,
}

/// The session backing the current view.
#[derive(Debug)]
pub enum ActiveSession {
    Search(SearchSession),
    Recipe(RecipeDetailSession),
    Leaderboard(LeaderboardSession),
}

impl ActiveSession {
    pub fn id(&self) -> SessionId {
        match self {
            Self::Search(s) => s.id(),
            Self::Recipe(s) => s.id(),
            Self::Leaderboard(s) => s.id(),
        }
    }

    fn close(&mut self) {
        match self {
            Self::Search(s) => s.close(),
            Self::Recipe(s) => s.close(),
            Self::Leaderboard(s) => s.close(),
        }
    }

    /// Whether a request for this session is still outstanding.
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Search(s) => s.is_searching(),
            Self::Recipe(s) => {
                s.status().is_loading()
                    || matches!(s.feedback().state(), FeedbackState::Submitting { .. })
            }
            Self::Leaderboard(s) => s.status().is_loading(),
        }
    }
}

pub struct Navigator {
    service: Arc<dyn RecipeService>,
    redirector: Redirector,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    current: ActiveSession,
}

impl Navigator {
    /// Create a navigator showing the search view.
    pub fn new(service: Arc<dyn RecipeService>, redirect_delay: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let redirector = Redirector::new(redirect_delay, events_tx.clone());

        Self {
            service,
            redirector,
            events_tx,
            events_rx,
            current: ActiveSession::Search(SearchSession::new()),
        }
    }

    pub fn current(&self) -> &ActiveSession {
        &self.current
    }

    pub fn view(&self) -> View {
        match &self.current {
            ActiveSession::Search(_) => View::Search,
            ActiveSession::Recipe(s) => View::Recipe {
                id: s.recipe_id().clone(),
                origin_query: s.origin_query().to_string(),
            },
            ActiveSession::Leaderboard(_) => View::Leaderboard,
        }
    }

    /// Switch views. The previous session is torn down first.
    pub fn navigate(&mut self, view: View) {
        self.current.close();
        debug!(from = %self.current.id(), to = ?view, "Navigating");

        self.current = match view {
            View::Search => ActiveSession::Search(SearchSession::new()),
            View::Recipe { id, origin_query } => {
                let mut session =
                    RecipeDetailSession::new(id, origin_query, self.redirector.clone());
                if let Some(recipe_id) = session.begin_load() {
                    self.spawn_recipe_load(session.id(), recipe_id);
                }
                ActiveSession::Recipe(session)
            }
            View::Leaderboard => {
                let mut session = LeaderboardSession::new();
                if session.begin_load() {
                    self.spawn_leaderboard_load(session.id());
                }
                ActiveSession::Leaderboard(session)
            }
        };
    }

    /// Replace the query text. Returns `false` outside the search view.
    pub fn update_query(&mut self, text: impl Into<String>) -> bool {
        match &mut self.current {
            ActiveSession::Search(s) => {
                s.update_text(text);
                true
            }
            _ => false,
        }
    }

    pub fn toggle_healthy(&mut self) -> bool {
        match &mut self.current {
            ActiveSession::Search(s) => {
                s.toggle_healthy();
                true
            }
            _ => false,
        }
    }

    /// Start a search. Returns whether a request was issued.
    pub fn submit_search(&mut self) -> bool {
        let ActiveSession::Search(session) = &mut self.current else {
            return false;
        };
        let Some(ticket) = session.begin_submit() else {
            return false;
        };

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            debug!(service = service.name(), session = %ticket.session(), "Requesting search");
            let result = service.search(ticket.query()).await;
            let _ = tx.send(SessionEvent::SearchCompleted { ticket, result });
        });
        true
    }

    /// Open the `index`-th search result, carrying the query along.
    pub fn open_result(&mut self, index: usize) -> bool {
        let ActiveSession::Search(session) = &self.current else {
            return false;
        };
        let Some(summary) = session.results().get(index) else {
            return false;
        };

        let view = View::Recipe {
            id: summary.id.clone(),
            origin_query: session.query().text.clone(),
        };
        self.navigate(view);
        true
    }

    /// Vote on the open recipe. Returns whether a submission was sent.
    pub fn send_feedback(&mut self, helpful: bool) -> bool {
        let ActiveSession::Recipe(session) = &mut self.current else {
            return false;
        };
        let Some(submission) = session.choose_feedback(helpful) else {
            return false;
        };

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        let session = session.id();
        tokio::spawn(async move {
            debug!(service = service.name(), session = %session, "Submitting feedback");
            let result = service.submit_feedback(&submission).await;
            let _ = tx.send(SessionEvent::FeedbackSent { session, result });
        });
        true
    }

    /// Wait for the next background event.
    pub async fn next_event(&mut self) -> Result<SessionEvent, NavigationError> {
        self.events_rx
            .recv()
            .await
            .ok_or(NavigationError::ChannelClosed)
    }

    /// Apply an event to the live session. Returns `false` if it was stale.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        if event.session() != self.current.id() {
            debug!(session = %event.session(), "Ignoring event for torn-down session");
            return false;
        }

        if let SessionEvent::RedirectDue { .. } = event {
            if !matches!(self.current, ActiveSession::Recipe(_)) {
                return false;
            }
            info!("Returning to search");
            self.navigate(View::Search);
            return true;
        }

        match (&mut self.current, event) {
            (ActiveSession::Search(s), SessionEvent::SearchCompleted { ticket, result }) => {
                s.complete(ticket, result)
            }
            (ActiveSession::Recipe(s), SessionEvent::RecipeLoaded { session, result }) => {
                s.complete_load(session, result)
            }
            (ActiveSession::Recipe(s), SessionEvent::FeedbackSent { session, result }) => {
                s.complete_feedback(session, result)
            }
            (ActiveSession::Leaderboard(s), SessionEvent::LeaderboardLoaded { session, result }) => {
                s.complete_load(session, result)
            }
            (_, event) => {
                debug!(?event, "Event does not apply to the current view");
                false
            }
        }
    }

    /// Wait for and apply the next event.
    pub async fn pump(&mut self) -> Result<bool, NavigationError> {
        let event = self.next_event().await?;
        Ok(self.handle(event))
    }

    /// Pump events until the current session has nothing outstanding.
    pub async fn settle(&mut self) -> Result<(), NavigationError> {
        while self.current.is_busy() {
            self.pump().await?;
        }
        Ok(())
    }

    fn spawn_recipe_load(&self, session: SessionId, recipe_id: RecipeId) {
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            debug!(
                service = service.name(),
                session = %session,
                recipe_id = %recipe_id,
                "Requesting recipe"
            );
            let result = service.recipe(&recipe_id).await;
            let _ = tx.send(SessionEvent::RecipeLoaded { session, result });
        });
    }

    fn spawn_leaderboard_load(&self, session: SessionId) {
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            debug!(service = service.name(), session = %session, "Requesting leaderboard");
            let result = service.top_feedback().await;
            let _ = tx.send(SessionEvent::LeaderboardLoaded { session, result });
        });
    }
}
