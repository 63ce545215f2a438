//! Static quiz content: questions, options, and per-category profiles.
//!
//! The table is supplied once at startup and is read-only afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Category;

/// A 24-bit color parsed from a `#RRGGBB` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid color token {0:?} (expected #RRGGBB)")]
pub struct InvalidColorError(String);

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(token: &str) -> Result<Self, InvalidColorError> {
        let invalid = || InvalidColorError(token.to_string());
        let hex = token.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = InvalidColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub index: usize,
    pub prompt: String,
    /// Order is significant: it defines the positional letters A, B, C, ...
    pub options: Vec<AnswerOption>,
}

/// Positional display label for the option at `position` (A, B, C, ...).
#[must_use]
pub fn option_letter(position: usize) -> char {
    u8::try_from(position)
        .ok()
        .filter(|p| *p < 26)
        .map_or('?', |p| char::from(b'A' + p))
}

/// Descriptive record for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub category: Category,
    pub name: String,
    pub english_name: String,
    pub color: Rgb,
    pub description: String,
    /// Partner-affinity text.
    pub partner: String,
    pub blind_spot: String,
    pub reading_strategy: Vec<String>,
    pub memory_strategy: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDef {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

/// Raw, unvalidated content as it appears in a content file.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentDocument {
    pub questions: Vec<QuestionDef>,
    pub profiles: Vec<CategoryProfile>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("content defines no questions")]
    NoQuestions,
    #[error("question {index} has {count} option(s); at least 2 are required")]
    TooFewOptions { index: usize, count: usize },
    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },
    #[error("profile for {0} is defined more than once")]
    DuplicateProfile(Category),
    #[error("no profile defined for {0}")]
    MissingProfile(Category),
}

/// Validated, immutable content lookup table.
#[derive(Debug, Clone)]
pub struct ContentTable {
    questions: Vec<Question>,
    /// Indexed by [`Category::canonical_index`].
    profiles: [CategoryProfile; Category::COUNT],
}

impl ContentTable {
    pub fn from_document(document: ContentDocument) -> Result<Self, ContentError> {
        if document.questions.is_empty() {
            return Err(ContentError::NoQuestions);
        }

        let mut questions = Vec::with_capacity(document.questions.len());
        for (index, def) in document.questions.into_iter().enumerate() {
            if def.prompt.trim().is_empty() {
                return Err(ContentError::EmptyPrompt { index });
            }
            if def.options.len() < 2 {
                return Err(ContentError::TooFewOptions {
                    index,
                    count: def.options.len(),
                });
            }
            questions.push(Question {
                index,
                prompt: def.prompt,
                options: def.options,
            });
        }

        let mut slots: [Option<CategoryProfile>; Category::COUNT] = Default::default();
        for profile in document.profiles {
            let slot = &mut slots[profile.category.canonical_index()];
            if slot.is_some() {
                return Err(ContentError::DuplicateProfile(profile.category));
            }
            *slot = Some(profile);
        }

        let mut profiles = Vec::with_capacity(Category::COUNT);
        for (category, slot) in Category::ALL.into_iter().zip(slots) {
            profiles.push(slot.ok_or(ContentError::MissingProfile(category))?);
        }
        let profiles: [CategoryProfile; Category::COUNT] = profiles
            .try_into()
            .unwrap_or_else(|_| unreachable!("one profile per category"));

        Ok(Self {
            questions,
            profiles,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn profile(&self, category: Category) -> &CategoryProfile {
        &self.profiles[category.canonical_index()]
    }
}
