//! Reveal timers.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::{GameEvent, RevealToken};

/// Schedules the end of a reveal phase and lets it be called off.
pub trait RevealScheduler {
    /// Arrange for `GameEvent::RevealElapsed` to arrive after `after`.
    fn schedule_reveal(&mut self, after: Duration) -> RevealToken;

    /// Drop a reveal that has not fired yet. Unknown tokens are ignored.
    fn cancel(&mut self, token: RevealToken);
}

/// Runs each reveal as a sleeping tokio task that reports back over the
/// app's event channel.
pub struct TokioScheduler {
    events: mpsc::UnboundedSender<GameEvent>,
    next_id: u64,
    pending: HashMap<RevealToken, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(events: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self {
            events,
            next_id: 0,
            pending: HashMap::new(),
        }
    }

    /// Abort every reveal still in flight.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl RevealScheduler for TokioScheduler {
    fn schedule_reveal(&mut self, after: Duration) -> RevealToken {
        self.pending.retain(|_, handle| !handle.is_finished());

        let token = RevealToken::new(self.next_id);
        self.next_id += 1;

        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = events.send(GameEvent::RevealElapsed(token));
        });
        self.pending.insert(token, handle);

        debug!(token = token.id(), delay_ms = after.as_millis() as u64, "reveal scheduled");
        token
    }

    fn cancel(&mut self, token: RevealToken) {
        if let Some(handle) = self.pending.remove(&token) {
            handle.abort();
            debug!(token = token.id(), "reveal cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
