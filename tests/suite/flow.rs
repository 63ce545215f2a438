//! Whole-flow tests driven through key events with the built-in content.

use crossterm::event::KeyCode;

use limitless_engine::{
    Category, DEFAULT_ADVANCE_DELAY, DEFAULT_ANALYZING_DELAY, Settings, Step, TimerKind,
};

use crate::common::{answer_all, answer_with, app, elapse, enter_quiz, press, render, type_str};

fn repeat(category: Category, count: usize) -> Vec<Category> {
    vec![category; count]
}

#[tokio::test(start_paused = true)]
async fn unanimous_answers_pick_that_type_with_canonical_runner_up() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");
    answer_all(&mut app, &repeat(Category::Owl, 20));

    assert_eq!(app.step(), Step::Analyzing);
    let result = app.session().result().expect("scored before analyzing");
    assert_eq!(result.primary.category, Category::Owl);
    // Every other category ties at zero: canonical order breaks the tie.
    assert_eq!(result.secondary.category, Category::Cheetah);
    assert_eq!(result.scores.get(Category::Owl), 20);
    assert_eq!(result.scores.total(), 20);

    elapse(&mut app, DEFAULT_ANALYZING_DELAY).await;
    assert_eq!(app.step(), Step::Result);
}

#[tokio::test(start_paused = true)]
async fn skewed_answers_rank_primary_and_secondary() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");
    let mut picks = repeat(Category::Dolphin, 12);
    picks.extend(repeat(Category::Elephant, 8));
    answer_all(&mut app, &picks);

    let result = app.session().result().expect("scored");
    assert_eq!(result.primary.category, Category::Dolphin);
    assert_eq!(result.secondary.category, Category::Elephant);
    assert_eq!(result.scores.get(Category::Dolphin), 12);
    assert_eq!(result.scores.get(Category::Elephant), 8);
}

#[tokio::test(start_paused = true)]
async fn answers_auto_advance_after_the_delay() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");

    answer_with(&mut app, Category::Cheetah);
    assert_eq!(app.session().current_question(), 0);
    assert!(app.is_timer_pending(TimerKind::AdvanceQuestion));

    elapse(&mut app, DEFAULT_ADVANCE_DELAY).await;
    assert_eq!(app.session().current_question(), 1);
}

#[tokio::test(start_paused = true)]
async fn next_without_an_answer_does_nothing() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");
    press(&mut app, KeyCode::Right);
    assert_eq!(app.session().current_question(), 0);
    assert_eq!(app.step(), Step::Quiz);
}

#[tokio::test(start_paused = true)]
async fn going_back_keeps_earlier_answers() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");
    answer_all(&mut app, &[Category::Elephant, Category::Dolphin]);
    assert_eq!(app.session().current_question(), 2);

    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.session().current_question(), 0);
    assert_eq!(app.session().current_answer(), Some(Category::Elephant));

    // Back at the first question is a no-op.
    press(&mut app, KeyCode::Left);
    assert_eq!(app.session().current_question(), 0);
}

#[tokio::test(start_paused = true)]
async fn reset_during_analysis_returns_to_intro_for_good() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");
    answer_all(&mut app, &repeat(Category::Cheetah, 20));
    assert_eq!(app.step(), Step::Analyzing);

    app.reset();
    assert_eq!(app.step(), Step::Intro);
    assert!(!app.is_timer_pending(TimerKind::RevealResult));

    elapse(&mut app, DEFAULT_ANALYZING_DELAY).await;
    assert_eq!(app.step(), Step::Intro);
    assert!(app.session().result().is_none());
    assert_eq!(app.session().user_name(), "");
}

#[tokio::test(start_paused = true)]
async fn commitment_gate_then_restart() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");
    answer_all(&mut app, &repeat(Category::Elephant, 20));
    elapse(&mut app, DEFAULT_ANALYZING_DELAY).await;
    assert_eq!(app.step(), Step::Result);

    type_str(&mut app, "ab");
    press(&mut app, KeyCode::Enter);
    assert!(!app.session().card_revealed());
    let screen = render(&mut app, 100, 30);
    assert!(screen.contains("Write at least 5 characters"));

    type_str(&mut app, "cde");
    press(&mut app, KeyCode::Enter);
    assert!(app.session().card_revealed());

    press(&mut app, KeyCode::Char('r'));
    assert_eq!(app.step(), Step::Intro);
    assert_eq!(app.session().commitment(), "");
}

#[tokio::test(start_paused = true)]
async fn result_screen_lists_the_balance_out_of_twenty() {
    let mut app = app(Settings::default());
    enter_quiz(&mut app, "Ada");
    let mut picks = repeat(Category::Owl, 11);
    picks.extend(repeat(Category::Cheetah, 9));
    answer_all(&mut app, &picks);
    elapse(&mut app, DEFAULT_ANALYZING_DELAY).await;

    let screen = render(&mut app, 100, 40);
    assert!(screen.contains("Owl Brain"));
    assert!(screen.contains("11 / 20"));
    assert!(screen.contains("9 / 20"));
    assert!(screen.contains("0 / 20"));
}
