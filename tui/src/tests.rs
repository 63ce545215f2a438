//! Render tests against ratatui's `TestBackend`.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use limitless_engine::{App, DEFAULT_ANALYZING_DELAY, Notice, Settings, Step, UiOptions};

use super::{CARD_WIDTH, draw, handle_key};
use crate::test_support::content;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

fn render(app: &mut App) -> String {
    let backend = TestBackend::new(WIDTH, HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            out.push_str(buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()));
        }
        out.push('\n');
    }
    out
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn test_app() -> App {
    let settings = Settings {
        ui: UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        },
        ..Settings::default()
    };
    App::new(content(), settings)
}

async fn app_at_result() -> App {
    let mut app = test_app();
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "Ada");
    press(&mut app, KeyCode::Enter);
    for pick in ['b', 'b', 'c', 'a'] {
        press(&mut app, KeyCode::Char(pick));
        press(&mut app, KeyCode::Right);
    }
    assert_eq!(app.step(), Step::Analyzing);
    tokio::time::sleep(DEFAULT_ANALYZING_DELAY + Duration::from_millis(10)).await;
    app.tick();
    assert_eq!(app.step(), Step::Result);
    app
}

#[test]
fn intro_shows_title_and_question_count() {
    let mut app = test_app();
    let screen = render(&mut app);
    assert!(screen.contains("The Last-Focus Brain Type Test"));
    assert!(screen.contains("4 questions"));
    assert!(screen.contains("Enter start"));
}

#[test]
fn identify_shows_name_and_blank_name_notice() {
    let mut app = test_app();
    press(&mut app, KeyCode::Enter);
    let screen = render(&mut app);
    assert!(screen.contains("What should we call you?"));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.notice(), Some(&Notice::NameRequired));
    let screen = render(&mut app);
    assert!(screen.contains("Please enter your name to continue."));

    type_str(&mut app, "Ada");
    let screen = render(&mut app);
    assert!(screen.contains("Ada"));
}

#[tokio::test(start_paused = true)]
async fn quiz_shows_counter_prompt_and_options() {
    let mut app = test_app();
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "Ada");
    press(&mut app, KeyCode::Enter);

    let screen = render(&mut app);
    assert!(screen.contains("QUESTION 1"));
    assert!(screen.contains("1 / 4"));
    assert!(screen.contains("When you study topic 1"));
    assert!(screen.contains("[A] Study like a cheetah"));
    assert!(screen.contains("[D] Study like a elephant"));
    assert!(screen.contains("Next"));
}

#[tokio::test(start_paused = true)]
async fn last_question_offers_result() {
    let mut app = test_app();
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "Ada");
    press(&mut app, KeyCode::Enter);
    for _ in 0..3 {
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Right);
    }
    let screen = render(&mut app);
    assert!(screen.contains("4 / 4"));
    assert!(screen.contains("See my result"));
}

#[tokio::test(start_paused = true)]
async fn analyzing_names_the_user() {
    let mut app = test_app();
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "Ada");
    press(&mut app, KeyCode::Enter);
    for _ in 0..4 {
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Right);
    }
    assert_eq!(app.step(), Step::Analyzing);
    let screen = render(&mut app);
    assert!(screen.contains("Analyzing Ada's brain..."));
}

#[tokio::test(start_paused = true)]
async fn result_shows_primary_type_and_balance() {
    let mut app = app_at_result().await;
    let screen = render(&mut app);
    assert!(screen.contains("Ada's brain type is"));
    assert!(screen.contains("Owl Brain"));
    assert!(screen.contains("THE OWL"));
    assert!(screen.contains("C.O.D.E BALANCE"));
    assert!(screen.contains("2 / 4"));
}

#[tokio::test(start_paused = true)]
async fn short_commitment_keeps_card_hidden() {
    let mut app = app_at_result().await;
    type_str(&mut app, "ab");
    press(&mut app, KeyCode::Enter);
    assert!(!app.session().card_revealed());

    render(&mut app);
    assert!(app.card_region().is_none());
}

#[tokio::test(start_paused = true)]
async fn revealed_card_is_mounted_and_focused() {
    let mut app = app_at_result().await;
    type_str(&mut app, "Read every morning");
    press(&mut app, KeyCode::Enter);
    assert!(app.session().card_revealed());

    render(&mut app);
    let region = app.card_region().expect("card mounted after first draw");
    assert_eq!(region.width(), CARD_WIDTH);
    assert!(
        region
            .text_lines()
            .iter()
            .any(|line| line.contains("\"Read every morning\""))
    );

    tokio::time::sleep(Duration::from_millis(150)).await;
    app.tick();
    let screen = render(&mut app);
    assert!(app.result_scroll_offset() > 0);
    assert!(screen.contains("LIMITLESS BRAIN DECLARATION"));
}

#[tokio::test(start_paused = true)]
async fn result_scrolls_with_page_keys() {
    let mut app = app_at_result().await;
    render(&mut app);
    assert_eq!(app.result_scroll_offset(), 0);

    press(&mut app, KeyCode::PageDown);
    render(&mut app);
    assert_eq!(app.result_scroll_offset(), 3);

    press(&mut app, KeyCode::PageUp);
    assert_eq!(app.result_scroll_offset(), 0);
}

#[tokio::test(start_paused = true)]
async fn restart_from_result_returns_to_intro() {
    let mut app = app_at_result().await;
    type_str(&mut app, "Read every morning");
    press(&mut app, KeyCode::Enter);
    render(&mut app);

    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.step(), Step::Intro);
    assert!(app.card_region().is_none());
    let screen = render(&mut app);
    assert!(screen.contains("The Last-Focus Brain Type Test"));
}

#[test]
fn ascii_only_renders_without_box_drawing_title_glyph() {
    let settings = Settings {
        ui: UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        },
        ..Settings::default()
    };
    let mut app = App::new(content(), settings);
    let screen = render(&mut app);
    assert!(screen.contains("(@) LIMITLESS"));
}
