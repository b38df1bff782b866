//! Per-view interaction sessions.
//!
//! Each navigable view owns one session: an explicit state machine whose
//! transitions are plain methods. Requests are split into a `begin_*` step
//! (guard + transition, returns what to send) and a `complete*` step that
//! applies the outcome. Outcomes are matched against the session id, so a
//! response that arrives after its session was torn down is dropped.
//!
//! The `async` drivers (`submit`, `load`, ...) chain both steps for callers
//! that own the session exclusively while the request is in flight.

mod detail;
mod feedback;
mod leaderboard;
mod redirect;
mod search;

pub use detail::RecipeDetailSession;
pub use feedback::{FeedbackState, FeedbackWorkflow, CONFIRMATION_NOTICE};
pub use leaderboard::LeaderboardSession;
pub use redirect::{Redirector, ScheduledRedirect};
pub use search::{SearchSession, SearchStatus, SearchTicket};

use std::fmt;
use uuid::Uuid;

use crate::client::{LeaderboardEntry, RecipeDetail, RecipeSummary, RequestError};

/// Identity of one session instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a fetch-on-entry view.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus<T> {
    Loading,
    Loaded(T),
    Failed(RequestError),
}

impl<T> LoadStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RequestError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Something that resolved in the background and must be applied to a session.
#[derive(Debug)]
pub enum SessionEvent {
    SearchCompleted {
        ticket: SearchTicket,
        result: Result<Vec<RecipeSummary>, RequestError>,
    },
    RecipeLoaded {
        session: SessionId,
        result: Result<RecipeDetail, RequestError>,
    },
    FeedbackSent {
        session: SessionId,
        result: Result<(), RequestError>,
    },
    LeaderboardLoaded {
        session: SessionId,
        result: Result<Vec<LeaderboardEntry>, RequestError>,
    },
    /// The post-feedback redirect timer fired.
    RedirectDue { session: SessionId },
}

impl SessionEvent {
    /// Session the event belongs to.
    pub fn session(&self) -> SessionId {
        match self {
            Self::SearchCompleted { ticket, .. } => ticket.session(),
            Self::RecipeLoaded { session, .. }
            | Self::FeedbackSent { session, .. }
            | Self::LeaderboardLoaded { session, .. }
            | Self::RedirectDue { session } => *session,
        }
    }
}
