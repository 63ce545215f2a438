//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use limitless_engine::{App, Category, ContentTable, Settings, Step, parse_content};

/// The content table shipped with the binary.
pub const EMBEDDED_CONTENT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/content.toml"));

pub fn content() -> ContentTable {
    parse_content(EMBEDDED_CONTENT).expect("embedded content is valid")
}

pub fn app(settings: Settings) -> App {
    App::new(content(), settings)
}

pub fn press(app: &mut App, code: KeyCode) {
    limitless_tui::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

pub fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Intro -> Identify -> Quiz with `name`.
pub fn enter_quiz(app: &mut App, name: &str) {
    press(app, KeyCode::Enter);
    type_str(app, name);
    press(app, KeyCode::Enter);
    assert_eq!(app.step(), Step::Quiz);
}

/// Pick the option for `category` on the current question by its letter.
pub fn answer_with(app: &mut App, category: Category) {
    let position = app
        .current_question()
        .and_then(|question| {
            question
                .options
                .iter()
                .position(|option| option.category == category)
        })
        .expect("every question offers every category");
    let letter = limitless_engine::option_letter(position).to_ascii_lowercase();
    press(app, KeyCode::Char(letter));
}

/// Answer every question in order, pressing Next after each answer.
pub fn answer_all(app: &mut App, picks: &[Category]) {
    for category in picks {
        answer_with(app, *category);
        press(app, KeyCode::Right);
    }
}

/// Sleep past `delay` under a paused clock, then apply due timers.
pub async fn elapse(app: &mut App, delay: Duration) {
    tokio::time::sleep(delay + Duration::from_millis(10)).await;
    app.tick();
}

/// Draw one frame into an off-screen terminal and return its text.
pub fn render(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal
        .draw(|frame| limitless_tui::draw(frame, app))
        .expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()));
        }
        out.push('\n');
    }
    out
}
