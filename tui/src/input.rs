//! Keyboard and paste input for the quiz screens.
//!
//! A blocking reader polls crossterm and forwards only what the quiz reacts
//! to: key presses (and repeats) and bracketed pastes. The frame loop drains
//! that queue once per frame through [`handle_events`].

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{io, time::Duration};
use tokio::sync::mpsc::{self, error::TryRecvError};

use limitless_engine::{App, DraftInput, Step};

/// How long the reader waits before noticing the pump was shut down.
const POLL_SLICE: Duration = Duration::from_millis(25);
const QUEUE_DEPTH: usize = 256;
/// A paste storm must not delay the next redraw.
const MAX_INPUTS_PER_FRAME: usize = 64;
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

enum QuizInput {
    Key(KeyEvent),
    Paste(String),
    Failed(io::Error),
}

impl QuizInput {
    fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key)),
            Event::Paste(text) => Some(Self::Paste(text)),
            _ => None,
        }
    }
}

/// Terminal reader running on the blocking pool.
///
/// The reader stops once the receiving side is closed, either by
/// [`InputPump::shutdown`] or by dropping the pump.
pub struct InputPump {
    rx: mpsc::Receiver<QuizInput>,
    reader: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let reader = tokio::task::spawn_blocking(move || read_terminal(&tx));
        Self {
            rx,
            reader: Some(reader),
        }
    }

    pub async fn shutdown(&mut self) {
        self.rx.close();
        if let Some(reader) = self.reader.take()
            && tokio::time::timeout(SHUTDOWN_GRACE, reader).await.is_err()
        {
            tracing::warn!("Input reader did not stop in time");
        }
    }

    fn poll_input(&mut self) -> Result<Option<QuizInput>> {
        match self.rx.try_recv() {
            Ok(input) => Ok(Some(input)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => bail!("terminal input reader stopped"),
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

fn read_terminal(tx: &mpsc::Sender<QuizInput>) {
    while !tx.is_closed() {
        let ready = match event::poll(POLL_SLICE) {
            Ok(ready) => ready,
            Err(err) => {
                let _ = tx.blocking_send(QuizInput::Failed(err));
                return;
            }
        };
        if !ready {
            continue;
        }
        let input = match event::read() {
            Ok(event) => match QuizInput::from_event(event) {
                Some(input) => input,
                None => continue,
            },
            Err(err) => QuizInput::Failed(err),
        };
        let failed = matches!(input, QuizInput::Failed(_));
        if tx.blocking_send(input).is_err() || failed {
            return;
        }
    }
}

/// Apply queued input to `app`. Returns `true` when the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    for _ in 0..MAX_INPUTS_PER_FRAME {
        let Some(next) = input.poll_input()? else {
            break;
        };
        match next {
            QuizInput::Key(key) => handle_key(app, key),
            QuizInput::Paste(text) => paste(app, &text),
            QuizInput::Failed(err) => {
                return Err(err).context("failed to read terminal input");
            }
        }
        if app.should_quit() {
            return Ok(true);
        }
    }
    Ok(app.should_quit())
}

fn paste(app: &mut App, text: &str) {
    let text = normalize_paste(app.step(), text);
    if !app.edit_draft(|draft| draft.enter_text(&text)) {
        tracing::debug!(step = app.step().label(), "Paste ignored: no text field");
    }
}

/// Names are single-line; commitments keep their line breaks.
fn normalize_paste(step: Step, text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if step == Step::Identify {
        text.replace('\n', " ")
    } else {
        text
    }
}

/// Apply a single key event to `app`.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    // Any key acknowledges the current notice.
    app.dismiss_notice();

    match app.step() {
        Step::Intro => handle_intro(app, key),
        Step::Identify => handle_identify(app, key),
        Step::Quiz => handle_quiz(app, key),
        Step::Analyzing => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.request_quit();
            }
        }
        Step::Result => handle_result(app, key),
    }
}

fn handle_intro(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.begin(),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}

fn handle_identify(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_name(),
        KeyCode::Esc => app.request_quit(),
        _ => {
            app.edit_draft(|draft| edit_text(draft, key));
        }
    }
}

fn handle_quiz(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ 'a'..='z') => app.select_option(usize::from(c as u8 - b'a')),
        KeyCode::Char(c @ '1'..='9') => app.select_option(usize::from(c as u8 - b'1')),
        KeyCode::Up => app.move_option_cursor(-1),
        KeyCode::Down => app.move_option_cursor(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_highlighted(),
        KeyCode::Right | KeyCode::Tab => app.go_next(),
        KeyCode::Left | KeyCode::Backspace | KeyCode::BackTab => app.go_back(),
        KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}

fn handle_result(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => app.request_export(),
        KeyCode::Char('r') if ctrl => app.reset(),
        KeyCode::PageUp => app.scroll_result_up(),
        KeyCode::PageDown => app.scroll_result_down(),
        KeyCode::Up if !ctrl => app.scroll_result_up(),
        KeyCode::Down if !ctrl => app.scroll_result_down(),
        _ if app.session().card_revealed() => match key.code {
            KeyCode::Char('s') => app.request_export(),
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
            _ => {}
        },
        KeyCode::Enter => app.reveal_card(),
        KeyCode::Esc => app.request_quit(),
        _ => {
            app.edit_draft(|draft| edit_text(draft, key));
        }
    }
}

/// Line-editing keys shared by every text field.
fn edit_text(draft: &mut DraftInput, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Backspace => draft.delete_char(),
        KeyCode::Delete => draft.delete_char_forward(),
        KeyCode::Left => draft.move_cursor_left(),
        KeyCode::Right => draft.move_cursor_right(),
        KeyCode::Home => draft.move_cursor_home(),
        KeyCode::End => draft.move_cursor_end(),
        KeyCode::Char('u') if ctrl => draft.clear(),
        KeyCode::Char('w') if ctrl => draft.delete_word_backwards(),
        KeyCode::Char(c) if !ctrl && c != '\r' => draft.enter_char(c),
        _ => {}
    }
}
