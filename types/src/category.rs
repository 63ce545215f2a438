//! The four brain-type categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A classification dimension assigned to every quiz option.
///
/// Declaration order is the canonical order: it drives zero-initialization,
/// tie-breaking, and tally display. Never derive ordering from a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cheetah,
    Owl,
    Dolphin,
    Elephant,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategoryError(pub String);

impl Category {
    /// Canonical ordered list of every category.
    pub const ALL: [Self; 4] = [Self::Cheetah, Self::Owl, Self::Dolphin, Self::Elephant];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this category in [`Category::ALL`].
    #[must_use]
    pub const fn canonical_index(self) -> usize {
        match self {
            Self::Cheetah => 0,
            Self::Owl => 1,
            Self::Dolphin => 2,
            Self::Elephant => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cheetah => "cheetah",
            Self::Owl => "owl",
            Self::Dolphin => "dolphin",
            Self::Elephant => "elephant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| UnknownCategoryError(s.to_string()))
    }
}
