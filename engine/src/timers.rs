//! Fixed-delay step timers.
//!
//! Each pending timer is a spawned tokio task that only sleeps. The
//! controller polls finished tasks from `App::tick()` and applies the
//! matching transition on the UI task, so the session is never touched from
//! another task. Aborting a handle is the cancellation mechanism.

use std::time::Duration;

use tokio::task::JoinHandle;

/// The transition a timer applies when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Move past question `from` after an answer was selected.
    AdvanceQuestion { from: usize },
    /// Leave Analyzing and show the result.
    RevealResult,
    /// Scroll the result view to the revealed card.
    FocusCard,
}

/// Timer slot. At most one timer per kind is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    AdvanceQuestion,
    RevealResult,
    FocusCard,
}

impl TimerEvent {
    #[must_use]
    pub fn kind(self) -> TimerKind {
        match self {
            Self::AdvanceQuestion { .. } => TimerKind::AdvanceQuestion,
            Self::RevealResult => TimerKind::RevealResult,
            Self::FocusCard => TimerKind::FocusCard,
        }
    }
}

#[derive(Debug)]
struct PendingTimer {
    event: TimerEvent,
    handle: JoinHandle<()>,
}

/// Timers owned by the controller.
///
/// Must be used from inside a tokio runtime: scheduling spawns a task.
#[derive(Debug, Default)]
pub struct PendingTimers {
    pending: Vec<PendingTimer>,
}

impl PendingTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire after `delay`, replacing any pending timer of
    /// the same kind.
    pub fn schedule(&mut self, event: TimerEvent, delay: Duration) {
        self.cancel(event.kind());
        tracing::debug!(?event, delay_ms = delay.as_millis(), "Timer scheduled");
        let handle = tokio::spawn(tokio::time::sleep(delay));
        self.pending.push(PendingTimer { event, handle });
    }

    /// Remove and return every timer whose delay has elapsed, in scheduling
    /// order.
    pub fn take_due(&mut self) -> Vec<TimerEvent> {
        let mut due = Vec::new();
        self.pending.retain(|timer| {
            if timer.handle.is_finished() {
                due.push(timer.event);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|timer| {
            if timer.event.kind() == kind {
                timer.handle.abort();
                tracing::debug!(event = ?timer.event, "Timer cancelled");
                false
            } else {
                true
            }
        });
    }

    pub fn cancel_all(&mut self) {
        for timer in self.pending.drain(..) {
            timer.handle.abort();
        }
    }

    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|timer| timer.event.kind() == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Drop for PendingTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
