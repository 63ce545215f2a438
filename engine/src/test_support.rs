//! Fixtures shared by the engine's unit tests.

use limitless_types::{
    AnswerOption, Category, CategoryProfile, ContentDocument, ContentTable, QuestionDef, Rgb,
};

use crate::Settings;

pub(crate) fn profile(category: Category) -> CategoryProfile {
    CategoryProfile {
        category,
        name: format!("{category} brain"),
        english_name: category.as_str().to_uppercase(),
        color: Rgb::new(40, 80, 120),
        description: format!("How a {category} learns."),
        partner: "Everyone".to_string(),
        blind_spot: "Details".to_string(),
        reading_strategy: vec!["Skim first".to_string()],
        memory_strategy: vec!["Repeat aloud".to_string()],
    }
}

/// `question_count` questions, each offering the four categories in
/// canonical order (so option position == canonical index).
pub(crate) fn content_with(question_count: usize) -> ContentTable {
    let questions = (0..question_count)
        .map(|i| QuestionDef {
            prompt: format!("Question {}", i + 1),
            options: Category::ALL
                .into_iter()
                .map(|category| AnswerOption {
                    label: format!("Answer like a {category}"),
                    category,
                })
                .collect(),
        })
        .collect();
    let document = ContentDocument {
        questions,
        profiles: Category::ALL.into_iter().map(profile).collect(),
    };
    match ContentTable::from_document(document) {
        Ok(table) => table,
        Err(err) => panic!("fixture content is valid: {err}"),
    }
}

pub(crate) fn content() -> ContentTable {
    content_with(4)
}

/// Default settings with exports written to `dir`.
pub(crate) fn settings_in(dir: &std::path::Path) -> Settings {
    let mut settings = Settings::default();
    settings.export.dir = dir.to_path_buf();
    settings
}
