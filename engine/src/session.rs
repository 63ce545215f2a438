//! The single in-flight quiz session.
//!
//! Fields are private and every mutator is crate-private: only the step
//! controller (`App`) changes a session, and only through these operations.

use limitless_types::{AnswerSet, Category, ScoringResult, Step};

/// What `select_answer` asks the controller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdvanceHint {
    /// Move past question `from` after the selection highlight delay.
    Schedule { from: usize },
    /// Last question: wait for an explicit `go_next`.
    Stay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NextOutcome {
    Moved,
    /// Last question answered; the controller scores and enters Analyzing.
    ReadyToScore,
    /// Current question unanswered.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    step: Step,
    current_question: usize,
    user_name: String,
    commitment: String,
    answers: AnswerSet,
    result: Option<ScoringResult>,
    card_revealed: bool,
}

impl Session {
    pub(crate) fn new(question_count: usize) -> Self {
        Self {
            step: Step::Intro,
            current_question: 0,
            user_name: String::new(),
            commitment: String::new(),
            answers: AnswerSet::new(question_count),
            result: None,
            card_revealed: false,
        }
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_question + 1 >= self.question_count()
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn commitment(&self) -> &str {
        &self.commitment
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<Category> {
        self.answers.get(self.current_question)
    }

    #[must_use]
    pub fn result(&self) -> Option<&ScoringResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn card_revealed(&self) -> bool {
        self.card_revealed
    }

    pub(crate) fn set_name(&mut self, text: &str) {
        self.user_name = text.trim().to_string();
    }

    pub(crate) fn set_commitment(&mut self, text: &str) {
        self.commitment = text.to_string();
    }

    pub(crate) fn select_answer(&mut self, category: Category) -> AdvanceHint {
        let from = self.current_question;
        self.answers.set(from, category);
        if self.is_last_question() {
            AdvanceHint::Stay
        } else {
            AdvanceHint::Schedule { from }
        }
    }

    /// Move to the next question without any answer check. Used by the
    /// automatic advance after a selection.
    pub(crate) fn advance_question(&mut self) -> bool {
        if self.is_last_question() {
            return false;
        }
        self.current_question += 1;
        true
    }

    pub(crate) fn go_next(&mut self) -> NextOutcome {
        if self.current_answer().is_none() {
            return NextOutcome::Blocked;
        }
        if self.advance_question() {
            NextOutcome::Moved
        } else {
            NextOutcome::ReadyToScore
        }
    }

    pub(crate) fn go_back(&mut self) -> bool {
        if self.current_question == 0 {
            return false;
        }
        self.current_question -= 1;
        true
    }

    // Step transitions. Each returns false (and changes nothing) when the
    // session is not in the expected source step.

    pub(crate) fn begin(&mut self) -> bool {
        self.transition(Step::Intro, Step::Identify)
    }

    pub(crate) fn enter_quiz(&mut self) -> bool {
        if self.user_name.is_empty() {
            return false;
        }
        self.transition(Step::Identify, Step::Quiz)
    }

    pub(crate) fn begin_analysis(&mut self, result: ScoringResult) -> bool {
        if !self.transition(Step::Quiz, Step::Analyzing) {
            return false;
        }
        self.result = Some(result);
        true
    }

    pub(crate) fn show_result(&mut self) -> bool {
        self.transition(Step::Analyzing, Step::Result)
    }

    pub(crate) fn reveal_card(&mut self) -> bool {
        if self.step != Step::Result {
            return false;
        }
        self.card_revealed = true;
        true
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.question_count());
    }

    fn transition(&mut self, from: Step, to: Step) -> bool {
        if self.step != from {
            tracing::debug!(
                current = self.step.label(),
                expected = from.label(),
                target = to.label(),
                "Ignored step transition"
            );
            return false;
        }
        tracing::debug!(from = from.label(), to = to.label(), "Step transition");
        self.step = to;
        true
    }
}
