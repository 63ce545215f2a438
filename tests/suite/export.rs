//! Declaration card export, end to end: render, capture, rasterize, write.

use crossterm::event::KeyCode;
use tempfile::tempdir;

use limitless_engine::{
    App, CARD_FOCUS_DELAY, Category, DEFAULT_ANALYZING_DELAY, Notice, Settings, Step,
};
use limitless_tui::CARD_WIDTH;

use crate::common::{answer_all, app, elapse, enter_quiz, press, render, type_str};

async fn revealed_card(settings: Settings, name: &str) -> App {
    let mut app = app(settings);
    enter_quiz(&mut app, name);
    answer_all(&mut app, &[Category::Dolphin; 20]);
    elapse(&mut app, DEFAULT_ANALYZING_DELAY).await;
    assert_eq!(app.step(), Step::Result);

    type_str(&mut app, "Read ten pages every morning");
    press(&mut app, KeyCode::Enter);
    assert!(app.session().card_revealed());
    app
}

#[tokio::test(start_paused = true)]
async fn saved_card_is_an_opaque_png_named_after_the_user() {
    let dir = tempdir().unwrap();
    let mut settings = Settings::default();
    settings.export.dir = dir.path().to_path_buf();
    let mut app = revealed_card(settings, "Ada").await;

    render(&mut app, 100, 30);
    let rows = app.card_region().expect("card mounted by the renderer").height();

    press(&mut app, KeyCode::Char('s'));
    assert!(app.is_exporting());
    app.finish_export().await;

    let expected = dir.path().join("Ada_Limitless_Brain_Declaration.png");
    assert_eq!(
        app.notice(),
        Some(&Notice::ExportSaved {
            path: expected.clone()
        })
    );

    let image = image::open(&expected).unwrap().to_rgba8();
    assert_eq!(image.width(), u32::from(CARD_WIDTH) * 8 * 3);
    assert_eq!(image.height(), u32::from(rows) * 16 * 3);
    assert!(image.pixels().all(|pixel| pixel.0[3] == 255));
}

#[tokio::test(start_paused = true)]
async fn export_before_the_card_is_drawn_does_nothing() {
    let dir = tempdir().unwrap();
    let mut settings = Settings::default();
    settings.export.dir = dir.path().to_path_buf();
    let mut app = revealed_card(settings, "Ada").await;

    // No frame drawn yet: nothing is mounted.
    press(&mut app, KeyCode::Char('s'));
    assert!(!app.is_exporting());
    assert!(app.notice().is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn custom_suffix_and_scale_apply() {
    let dir = tempdir().unwrap();
    let mut settings = Settings::default();
    settings.export.dir = dir.path().to_path_buf();
    settings.export.scale = 1;
    settings.export.file_suffix = "card".to_string();
    let mut app = revealed_card(settings, "Grace").await;

    render(&mut app, 100, 30);
    let rows = app.card_region().expect("mounted").height();
    press(&mut app, KeyCode::Char('s'));
    app.finish_export().await;

    let image = image::open(dir.path().join("Grace_card.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(image.width(), u32::from(CARD_WIDTH) * 8);
    assert_eq!(image.height(), u32::from(rows) * 16);
}

#[tokio::test(start_paused = true)]
async fn focus_scrolls_the_card_into_view() {
    let mut app = revealed_card(Settings::default(), "Ada").await;
    render(&mut app, 80, 24);
    assert_eq!(app.result_scroll_offset(), 0);

    elapse(&mut app, CARD_FOCUS_DELAY).await;
    let screen = render(&mut app, 80, 24);
    assert!(app.result_scroll_offset() > 0);
    assert!(screen.contains("LIMITLESS BRAIN DECLARATION"));
}
