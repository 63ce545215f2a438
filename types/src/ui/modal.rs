//! Panel motion tied to quiz events.

use std::time::Duration;

use super::animation::AnimPhase;

/// What the panel is reacting to. Each kind maps to one motion in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEffectKind {
    /// The declaration card was issued: the panel pops in from a smaller size.
    CardReveal,
    /// The result screen replaced the analysis interstitial: the panel rises.
    ResultEntry,
    /// A name or commitment was refused: the panel shakes sideways.
    Reject,
}

impl ModalEffectKind {
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::CardReveal => Duration::from_millis(200),
            Self::ResultEntry => Duration::from_millis(300),
            Self::Reject => Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModalEffect {
    kind: ModalEffectKind,
    elapsed: Duration,
    duration: Duration,
}

impl ModalEffect {
    #[must_use]
    pub fn new(kind: ModalEffectKind) -> Self {
        Self::with_duration(kind, kind.duration())
    }

    #[must_use]
    pub fn with_duration(kind: ModalEffectKind, duration: Duration) -> Self {
        Self {
            kind,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        AnimPhase::at(self.elapsed, self.duration)
    }

    /// Normalized progress; 1.0 once completed.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.phase() {
            AnimPhase::Running { progress } => progress,
            AnimPhase::Completed => 1.0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ModalEffectKind {
        self.kind
    }
}
