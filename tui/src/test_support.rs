//! Fixtures shared by the TUI's unit tests.

use limitless_engine::{
    AnswerOption, Category, CategoryProfile, ContentDocument, ContentTable, QuestionDef, Rgb,
};

fn profile(category: Category) -> CategoryProfile {
    let color = match category {
        Category::Cheetah => Rgb::new(249, 115, 22),
        Category::Owl => Rgb::new(99, 102, 241),
        Category::Dolphin => Rgb::new(6, 182, 212),
        Category::Elephant => Rgb::new(16, 185, 129),
    };
    CategoryProfile {
        category,
        name: format!("{} Brain", capitalize(category.as_str())),
        english_name: format!("THE {}", category.as_str().to_uppercase()),
        color,
        description: format!("How a {category} learns."),
        partner: "Someone who finishes what you start.".to_string(),
        blind_spot: "Skipping the details.".to_string(),
        reading_strategy: vec!["Skim the headings first.".to_string()],
        memory_strategy: vec!["Explain it out loud.".to_string()],
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Four questions, each offering the categories in canonical order.
pub(crate) fn content() -> ContentTable {
    let questions = (0..4)
        .map(|i| QuestionDef {
            prompt: format!("When you study topic {}, what do you do first?", i + 1),
            options: Category::ALL
                .into_iter()
                .map(|category| AnswerOption {
                    label: format!("Study like a {category}"),
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
