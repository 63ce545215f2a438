//! `limitless` binary: wires configuration, content, and the terminal to the
//! quiz controller in [`limitless_engine`] and the renderer in [`limitless_tui`].
//!
//! Startup order matters: logging goes to a file before the alternate screen
//! is entered, config problems degrade to defaults, and a card export still in
//! flight when the user quits is awaited before the process exits.
//!
//! Each frame (8ms) drains queued key events, applies due timers and export
//! results via `App::tick`, then redraws.

mod assets;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Stdout, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use limitless_engine::{
    App, ContentTable, LimitlessConfig, Settings, load_content_file, parse_content,
};
use limitless_tui::{InputPump, draw, handle_events};

const FRAME_INTERVAL: Duration = Duration::from_millis(8);
const LOG_FILE_NAME: &str = "limitless.log";

/// Where log lines go, plus the problems hit while choosing it.
struct LogTarget {
    file: Option<(PathBuf, File)>,
    skipped: Vec<String>,
}

impl LogTarget {
    /// First writable candidate wins. The terminal is never a target: it
    /// belongs to the quiz screen.
    fn open() -> Self {
        let mut skipped = Vec::new();
        for path in log_dirs().into_iter().map(|dir| dir.join(LOG_FILE_NAME)) {
            match append_to(&path) {
                Ok(file) => {
                    return Self {
                        file: Some((path, file)),
                        skipped,
                    };
                }
                Err(err) => skipped.push(format!("{}: {err}", path.display())),
            }
        }
        Self {
            file: None,
            skipped,
        }
    }
}

/// `~/.limitless/logs`, then `./.limitless/logs`.
fn log_dirs() -> Vec<PathBuf> {
    let home = LimitlessConfig::path()
        .and_then(|config| config.parent().map(|dir| dir.join("logs")));
    home.into_iter()
        .chain(std::iter::once(Path::new(".limitless").join("logs")))
        .collect()
}

fn append_to(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let target = LogTarget::open();

    let Some((path, file)) = target.file else {
        tracing_subscriber::registry().with(filter).init();
        return;
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    tracing::info!(path = %path.display(), "Logging initialized");
    for skipped in target.skipped {
        tracing::warn!(candidate = %skipped, "Log location unusable");
    }
}

/// A broken config file is logged and replaced by defaults.
fn load_settings() -> (Settings, Option<PathBuf>) {
    match LimitlessConfig::load() {
        Ok(Some(config)) => (config.settings(), config.content_path()),
        Ok(None) => (Settings::default(), None),
        Err(err) => {
            tracing::warn!(path = %err.path().display(), %err, "Ignoring invalid config");
            (Settings::default(), None)
        }
    }
}

/// The configured content file when it loads, the bundled table otherwise.
fn load_content(custom: Option<&Path>) -> Result<ContentTable> {
    if let Some(path) = custom {
        match load_content_file(path) {
            Ok(table) => {
                tracing::info!(path = %path.display(), "Loaded custom content");
                return Ok(table);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Falling back to built-in content");
            }
        }
    }
    parse_content(assets::content()).context("built-in content is invalid")
}

fn restore_terminal(out: &mut impl io::Write) {
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
}

/// Raw mode, bracketed paste, and the alternate screen for as long as this
/// value lives. Dropping it (including during unwinding) restores the shell.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        let entered = execute!(out, EnableBracketedPaste, EnterAlternateScreen)
            .map_err(anyhow::Error::from)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout())).map_err(Into::into));
        match entered {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                restore_terminal(&mut out);
                Err(err)
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let (settings, content_path) = load_settings();
    let content = load_content(content_path.as_deref())?;
    tracing::info!(questions = content.question_count(), "Quiz ready");
    let mut app = App::new(content, settings);

    let outcome = match TerminalSession::enter() {
        Ok(mut session) => run_app(&mut session.terminal, &mut app).await,
        Err(err) => Err(err.context("failed to set up the terminal")),
    };

    app.finish_export().await;
    for notice in app.take_notices() {
        tracing::info!(notice = %notice.message(), "Unseen notice at exit");
    }

    outcome
}

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let outcome = loop {
        frames.tick().await;
        match step_frame(terminal, app, &mut input) {
            Ok(true) => break Ok(()),
            Ok(false) => {}
            Err(err) => break Err(err),
        }
    };

    input.shutdown().await;
    outcome
}

/// One frame. Returns `true` once the user asked to quit.
fn step_frame<B>(terminal: &mut Terminal<B>, app: &mut App, input: &mut InputPump) -> Result<bool>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    if handle_events(app, input)? {
        return Ok(true);
    }
    app.tick();
    terminal.draw(|frame| draw(frame, app))?;
    Ok(false)
}
