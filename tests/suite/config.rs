//! Config file handling as the binary sees it.

use std::time::Duration;

use crossterm::event::KeyCode;
use tempfile::tempdir;

use limitless_engine::{Category, LimitlessConfig, Notice, Step};

use crate::common::{answer_all, app, elapse, enter_quiz, press, type_str};

#[test]
fn full_config_resolves_every_setting() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[display]
ascii_only = true
reduced_motion = true

[quiz]
advance_delay_ms = 50
analyzing_delay_ms = 1000
min_commitment_chars = 12

[export]
dir = "/tmp/cards"
scale = 0
file_suffix = "  "
"#,
    )
    .unwrap();

    let settings = LimitlessConfig::load_from(&path).unwrap().settings();

    assert!(settings.ui.ascii_only);
    assert!(!settings.ui.high_contrast);
    assert!(settings.ui.reduced_motion);
    assert_eq!(settings.quiz.advance_delay, Duration::from_millis(50));
    assert_eq!(settings.quiz.analyzing_delay, Duration::from_millis(1000));
    assert_eq!(settings.quiz.min_commitment_chars, 12);
    assert_eq!(settings.export.dir, std::path::PathBuf::from("/tmp/cards"));
    assert_eq!(settings.export.scale, 1);
    assert_eq!(settings.export.file_suffix, "Limitless_Brain_Declaration");
}

#[test]
fn broken_config_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[quiz\nadvance_delay_ms = ").unwrap();

    let err = LimitlessConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), &path);
}

#[tokio::test(start_paused = true)]
async fn configured_delays_and_minimum_drive_the_flow() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[quiz]\nanalyzing_delay_ms = 400\nmin_commitment_chars = 12\n",
    )
    .unwrap();
    let settings = LimitlessConfig::load_from(&path).unwrap().settings();

    let mut app = app(settings);
    enter_quiz(&mut app, "Ada");
    answer_all(&mut app, &[Category::Cheetah; 20]);
    elapse(&mut app, Duration::from_millis(400)).await;
    assert_eq!(app.step(), Step::Result);

    type_str(&mut app, "read daily");
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.notice(),
        Some(&Notice::CommitmentTooShort { min: 12 })
    );

    type_str(&mut app, " at 7am");
    press(&mut app, KeyCode::Enter);
    assert!(app.session().card_revealed());
}
