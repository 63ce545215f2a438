//! Domain types for the Limitless brain-type quiz: categories, the content
//! table, answers and scores, and the step machine.
//!
//! No IO and no async. Content arrives here already parsed; validation of
//! its shape happens in [`ContentTable::from_document`].

mod answers;
mod category;
mod content;
mod step;
pub mod ui;

pub use answers::{AnswerSet, CategoryTally, ScoringResult};
pub use category::{Category, UnknownCategoryError};
pub use content::{
    AnswerOption, CategoryProfile, ContentDocument, ContentError, ContentTable,
    InvalidColorError, Question, QuestionDef, Rgb, option_letter,
};
pub use step::Step;
