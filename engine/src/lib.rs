//! Core engine for Limitless - step state machine and orchestration.
//!
//! This crate contains the `App` controller without TUI dependencies. The
//! TUI owns the frame loop and calls into `App` for every user action;
//! background work (step timers, card export) runs on tokio tasks whose
//! results are applied in [`App::tick`].

use std::time::{Duration, Instant};

use futures_util::future::FutureExt;
use tokio::task::{JoinError, JoinHandle};

pub use limitless_export::{CapturedCell, CapturedRegion, ExportError, ExportOutcome, ExportRequest};
pub use limitless_types::ui::{
    AnimPhase, DraftInput, ModalEffect, ModalEffectKind, ResultScroll, UiOptions, ViewState,
};
pub use limitless_types::{
    AnswerOption, AnswerSet, Category, CategoryProfile, CategoryTally, ContentDocument,
    ContentTable, Question, QuestionDef, Rgb, ScoringResult, Step, option_letter,
};

mod config;
pub use config::{
    CARD_FOCUS_DELAY, ConfigError, ContentConfig, DEFAULT_ADVANCE_DELAY, DEFAULT_ANALYZING_DELAY,
    DEFAULT_MIN_COMMITMENT_CHARS, DisplayConfig, ExportConfig, ExportSettings, LimitlessConfig,
    QuizConfig, QuizSettings, Settings, config_path, expand_env_vars, expand_home, expand_path,
};

mod content;
pub use content::{ContentLoadError, load_content_file, parse_content};

mod notifications;
pub use notifications::{Notice, NoticeQueue};

mod scoring;
pub use scoring::{ScoringError, score};

mod session;
pub use session::Session;
use session::{AdvanceHint, NextOutcome};

mod timers;
pub use timers::{PendingTimers, TimerEvent, TimerKind};

#[cfg(test)]
mod test_support;

type ExportJoin = JoinHandle<Result<ExportOutcome, ExportError>>;

/// An export running on the blocking pool.
#[derive(Debug)]
struct ExportTask {
    handle: ExportJoin,
    path: std::path::PathBuf,
}

/// The quiz controller: one session, its timers, and its view state.
///
/// Owned by the frame loop and handed to the renderer by `&mut`; every
/// mutation happens on that task.
pub struct App {
    content: ContentTable,
    session: Session,
    settings: Settings,
    timers: PendingTimers,
    /// In-flight card export. At most one.
    export_task: Option<ExportTask>,
    /// Last captured declaration card, written by the renderer.
    card_region: Option<CapturedRegion>,
    notices: NoticeQueue,
    view: ViewState,
    name_draft: DraftInput,
    commitment_draft: DraftInput,
    /// Highlighted option position in the current question.
    option_cursor: usize,
    should_quit: bool,
    tick: usize,
}

impl App {
    #[must_use]
    pub fn new(content: ContentTable, settings: Settings) -> Self {
        let session = Session::new(content.question_count());
        let view = ViewState::new(settings.ui);
        Self {
            content,
            session,
            settings,
            timers: PendingTimers::new(),
            export_task: None,
            card_region: None,
            notices: NoticeQueue::new(),
            view,
            name_draft: DraftInput::default(),
            commitment_draft: DraftInput::default(),
            option_cursor: 0,
            should_quit: false,
            tick: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.session.step()
    }

    #[must_use]
    pub fn content(&self) -> &ContentTable {
        &self.content
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.view.ui_options
    }

    /// The question currently shown in the Quiz step.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.content.question(self.session.current_question())
    }

    #[must_use]
    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    #[must_use]
    pub fn name_draft(&self) -> &DraftInput {
        &self.name_draft
    }

    #[must_use]
    pub fn commitment_draft(&self) -> &DraftInput {
        &self.commitment_draft
    }

    /// The draft that keyboard text goes to in the current step, if any.
    #[must_use]
    pub fn active_draft(&self) -> Option<&DraftInput> {
        match self.step() {
            Step::Identify => Some(&self.name_draft),
            Step::Result if !self.session.card_revealed() => Some(&self.commitment_draft),
            _ => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.latest()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.clear();
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.export_task.is_some()
    }

    #[must_use]
    pub fn card_region(&self) -> Option<&CapturedRegion> {
        self.card_region.as_ref()
    }

    #[must_use]
    pub fn is_timer_pending(&self, kind: TimerKind) -> bool {
        self.timers.is_pending(kind)
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------------
    // Step transitions
    // ------------------------------------------------------------------------

    /// Intro -> Identify.
    pub fn begin(&mut self) {
        self.session.begin();
    }

    /// Apply an edit to the active text draft and mirror it into the session.
    ///
    /// Returns `false` when no text field is active in the current step.
    pub fn edit_draft(&mut self, edit: impl FnOnce(&mut DraftInput)) -> bool {
        match self.step() {
            Step::Identify => {
                edit(&mut self.name_draft);
                self.session.set_name(self.name_draft.text());
                true
            }
            Step::Result if !self.session.card_revealed() => {
                edit(&mut self.commitment_draft);
                self.session.set_commitment(self.commitment_draft.text());
                true
            }
            _ => false,
        }
    }

    /// Identify -> Quiz when the trimmed name is non-empty.
    pub fn submit_name(&mut self) {
        if self.step() != Step::Identify {
            return;
        }
        if !self.session.enter_quiz() {
            self.reject(Notice::NameRequired);
            return;
        }
        self.sync_option_cursor();
    }

    /// Pick the option at `position` of the current question.
    pub fn select_option(&mut self, position: usize) {
        if self.step() != Step::Quiz {
            return;
        }
        let Some(category) = self
            .current_question()
            .and_then(|question| question.options.get(position))
            .map(|option| option.category)
        else {
            tracing::debug!(position, "Ignored selection of missing option");
            return;
        };

        self.option_cursor = position;
        match self.session.select_answer(category) {
            AdvanceHint::Schedule { from } => self.timers.schedule(
                TimerEvent::AdvanceQuestion { from },
                self.settings.quiz.advance_delay,
            ),
            AdvanceHint::Stay => {}
        }
    }

    /// Pick the highlighted option.
    pub fn select_highlighted(&mut self) {
        self.select_option(self.option_cursor);
    }

    pub fn move_option_cursor(&mut self, delta: isize) {
        let Some(count) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        if count == 0 {
            return;
        }
        self.option_cursor = self
            .option_cursor
            .saturating_add_signed(delta)
            .min(count - 1);
    }

    pub fn go_next(&mut self) {
        if self.step() != Step::Quiz {
            return;
        }
        match self.session.go_next() {
            NextOutcome::Moved => {
                self.timers.cancel(TimerKind::AdvanceQuestion);
                self.sync_option_cursor();
            }
            NextOutcome::ReadyToScore => self.finish_quiz(),
            NextOutcome::Blocked => {
                tracing::debug!(
                    question = self.session.current_question(),
                    "Next ignored: question unanswered"
                );
            }
        }
    }

    pub fn go_back(&mut self) {
        if self.step() != Step::Quiz {
            return;
        }
        if self.session.go_back() {
            self.timers.cancel(TimerKind::AdvanceQuestion);
            self.sync_option_cursor();
        }
    }

    /// Quiz -> Analyzing. The result is computed before the step changes.
    fn finish_quiz(&mut self) {
        self.timers.cancel(TimerKind::AdvanceQuestion);
        let result = match score(self.session.answers(), &self.content) {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(%err, "Scoring invariant violated");
                return;
            }
        };
        tracing::info!(
            primary = %result.primary.category,
            secondary = %result.secondary.category,
            "Quiz scored"
        );
        if self.session.begin_analysis(result) {
            self.timers
                .schedule(TimerEvent::RevealResult, self.settings.quiz.analyzing_delay);
        }
    }

    /// Reveal the declaration card once the commitment is long enough.
    pub fn reveal_card(&mut self) {
        if self.step() != Step::Result || self.session.card_revealed() {
            return;
        }
        let min = self.settings.quiz.min_commitment_chars;
        if self.session.commitment().trim().chars().count() < min {
            self.reject(Notice::CommitmentTooShort { min });
            return;
        }
        if self.session.reveal_card() {
            self.start_effect(ModalEffect::new(ModalEffectKind::CardReveal));
            self.timers
                .schedule(TimerEvent::FocusCard, self.settings.quiz.card_focus_delay);
        }
    }

    /// Back to Intro with every trace of the session discarded.
    ///
    /// Cancels pending timers, forgets the mounted card, and drops the
    /// outcome of an in-flight export.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        if let Some(task) = self.export_task.take() {
            // The blocking write cannot be interrupted; its result is dropped.
            tracing::debug!(path = %task.path.display(), "Discarding in-flight export");
        }
        self.card_region = None;
        self.session.reset();
        self.name_draft.clear();
        self.commitment_draft.clear();
        self.option_cursor = 0;
        self.notices.clear();
        self.view.scroll_to_top();
        self.view.result_scroll_max = 0;
        self.view.modal_effect = None;
        tracing::debug!("Session reset");
    }

    // ------------------------------------------------------------------------
    // Card export
    // ------------------------------------------------------------------------

    /// Record the card region most recently drawn by the renderer.
    pub fn mount_card_region(&mut self, region: CapturedRegion) {
        if !self.session.card_revealed() {
            return;
        }
        self.card_region = Some(region);
    }

    pub fn unmount_card_region(&mut self) {
        self.card_region = None;
    }

    /// Start exporting the mounted card.
    ///
    /// Without a mounted card this does nothing. While an export is running,
    /// further requests only produce [`Notice::ExportBusy`].
    pub fn request_export(&mut self) {
        if self.export_task.is_some() {
            self.notices.push(Notice::ExportBusy);
            return;
        }
        let Some(region) = self.card_region.clone() else {
            tracing::debug!("Export requested with no card mounted");
            return;
        };

        let export = &self.settings.export;
        let request = ExportRequest::for_user(
            export.dir.clone(),
            self.session.user_name(),
            &export.file_suffix,
            export.scale,
        );
        let path = request.path();
        tracing::debug!(path = %path.display(), "Starting card export");
        let handle = tokio::task::spawn_blocking(move || {
            limitless_export::export_card(Some(&region), &request)
        });
        self.export_task = Some(ExportTask { handle, path });
    }

    fn poll_export(&mut self) {
        let finished = self
            .export_task
            .as_ref()
            .is_some_and(|task| task.handle.is_finished());
        if !finished {
            return;
        }
        let Some(task) = self.export_task.take() else {
            return;
        };

        match task.handle.now_or_never() {
            Some(result) => self.apply_export_result(result),
            None => self.notices.push(Notice::ExportFailed {
                reason: "export task not ready".to_string(),
            }),
        }
    }

    /// Wait for an in-flight export and apply its outcome.
    pub async fn finish_export(&mut self) {
        if let Some(task) = self.export_task.take() {
            let result = task.handle.await;
            self.apply_export_result(result);
        }
    }

    fn apply_export_result(&mut self, result: Result<Result<ExportOutcome, ExportError>, JoinError>) {
        match result {
            Ok(Ok(ExportOutcome::Saved(path))) => {
                tracing::info!(path = %path.display(), "Card exported");
                self.notices.push(Notice::ExportSaved { path });
            }
            Ok(Ok(ExportOutcome::Skipped)) => {}
            Ok(Err(err)) => {
                tracing::warn!(%err, "Card export failed");
                self.notices.push(Notice::ExportFailed {
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                tracing::warn!(%err, "Card export task failed");
                self.notices.push(Notice::ExportFailed {
                    reason: format!("export task panicked: {err}"),
                });
            }
        }
    }

    // ------------------------------------------------------------------------
    // Frame loop hooks
    // ------------------------------------------------------------------------

    /// Once per frame: advance the spinner, apply due timers, and collect a
    /// finished export.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        for event in self.timers.take_due() {
            self.apply_timer(event);
        }
        self.poll_export();
    }

    fn apply_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::AdvanceQuestion { from } => {
                if self.step() != Step::Quiz || self.session.current_question() != from {
                    tracing::debug!(from, "Dropped stale advance timer");
                    return;
                }
                if self.session.advance_question() {
                    self.sync_option_cursor();
                }
            }
            TimerEvent::RevealResult => {
                if self.session.show_result() {
                    self.view.scroll_to_top();
                    self.start_effect(ModalEffect::new(ModalEffectKind::ResultEntry));
                }
            }
            TimerEvent::FocusCard => {
                if self.session.card_revealed() {
                    self.view.result_scroll = ResultScroll::FocusCard;
                }
            }
        }
    }

    /// Wall time since the previous call; drives panel effects.
    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.view.last_frame);
        self.view.last_frame = now;
        elapsed
    }

    pub fn modal_effect_mut(&mut self) -> Option<&mut ModalEffect> {
        self.view.modal_effect.as_mut()
    }

    pub fn clear_modal_effect(&mut self) {
        self.view.modal_effect = None;
    }

    // ------------------------------------------------------------------------
    // Result view scrolling
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn result_scroll(&self) -> ResultScroll {
        self.view.result_scroll
    }

    /// Record the scrollable extent and, if requested, resolve a pending
    /// focus-card scroll to the card's offset.
    pub fn update_result_scroll(&mut self, max: u16, card_offset: Option<u16>) {
        self.view.result_scroll_max = max;
        if self.view.result_scroll == ResultScroll::FocusCard
            && let Some(offset) = card_offset
        {
            self.view.result_scroll = ResultScroll::Manual {
                offset_from_top: offset.min(max),
            };
        }
    }

    #[must_use]
    pub fn result_scroll_offset(&self) -> u16 {
        match self.view.result_scroll {
            ResultScroll::Top => 0,
            ResultScroll::Manual { offset_from_top } => offset_from_top.min(self.view.result_scroll_max),
            ResultScroll::FocusCard => self.view.result_scroll_max,
        }
    }

    pub fn scroll_result_up(&mut self) {
        self.view.scroll_by(-3);
    }

    pub fn scroll_result_down(&mut self) {
        self.view.scroll_by(3);
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn reject(&mut self, notice: Notice) {
        tracing::debug!(?notice, "Input rejected");
        self.notices.push(notice);
        self.start_effect(ModalEffect::new(ModalEffectKind::Reject));
    }

    fn start_effect(&mut self, effect: ModalEffect) {
        if self.view.ui_options.reduced_motion {
            return;
        }
        self.view.modal_effect = Some(effect);
    }

    /// Highlight the recorded answer of the current question, or the first
    /// option when unanswered.
    fn sync_option_cursor(&mut self) {
        let answer = self.session.current_answer();
        self.option_cursor = self
            .current_question()
            .and_then(|question| {
                question
                    .options
                    .iter()
                    .position(|option| Some(option.category) == answer)
            })
            .unwrap_or(0);
    }
}
