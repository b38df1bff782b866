//! One-shot deferred redirect tied to a session's lifetime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{SessionEvent, SessionId};

/// Schedules redirects by posting `SessionEvent::RedirectDue` after a delay.
///
/// Cheap to clone; every clone posts to the same event channel.
#[derive(Debug, Clone)]
pub struct Redirector {
    delay: Duration,
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl Redirector {
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { delay, tx }
    }

    /// Schedule a redirect for `session`. Must be called within a tokio runtime.
    pub fn schedule(&self, session: SessionId) -> ScheduledRedirect {
        let delay = self.delay;
        let tx = self.tx.clone();

        debug!(session = %session, delay_ms = delay.as_millis() as u64, "Redirect scheduled");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(SessionEvent::RedirectDue { session }).is_err() {
                debug!(session = %session, "Redirect dropped, no receiver");
            }
        });

        ScheduledRedirect { handle }
    }
}

/// A pending redirect. Dropping it cancels the redirect.
#[derive(Debug)]
pub struct ScheduledRedirect {
    handle: JoinHandle<()>,
}

impl ScheduledRedirect {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the timer has fired or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledRedirect {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
