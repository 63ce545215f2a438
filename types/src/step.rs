/// Top-level phase of the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Splash screen.
    #[default]
    Intro,
    /// Name entry.
    Identify,
    Quiz,
    /// Fixed pause between the last answer and the result screen.
    Analyzing,
    Result,
}

impl Step {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intro => "Intro",
            Self::Identify => "Identify",
            Self::Quiz => "Quiz",
            Self::Analyzing => "Analyzing",
            Self::Result => "Result",
        }
    }
}
