use std::time::Duration;

/// Where an effect is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    /// `progress` runs from 0.0 towards 1.0.
    Running { progress: f32 },
    Completed,
}

impl AnimPhase {
    /// Phase after `elapsed` of an effect lasting `duration`. Zero-length
    /// effects are complete from the start.
    #[must_use]
    pub fn at(elapsed: Duration, duration: Duration) -> Self {
        if elapsed >= duration {
            return Self::Completed;
        }
        Self::Running {
            progress: (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0),
        }
    }
}
