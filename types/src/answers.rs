//! Answer collection and scoring outcome types.

use crate::{Category, CategoryProfile};

/// Per-question record of the chosen category.
///
/// Length is fixed at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    slots: Box<[Option<Category>]>,
}

impl AnswerSet {
    /// An all-unanswered set sized for `question_count` questions.
    #[must_use]
    pub fn new(question_count: usize) -> Self {
        Self {
            slots: vec![None; question_count].into_boxed_slice(),
        }
    }

    /// Build a set from explicit slots (mostly useful for tests and fixtures).
    #[must_use]
    pub fn from_slots(slots: Vec<Option<Category>>) -> Self {
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Category> {
        self.slots.get(index).copied().flatten()
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Record `category` for `index`, overwriting any earlier choice.
    ///
    /// Returns the previous choice. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, category: Category) -> Option<Category> {
        let slot = self.slots.get_mut(index)?;
        slot.replace(category)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Category>> + '_ {
        self.slots.iter().copied()
    }
}

/// Count per category, stored and iterated in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryTally {
    counts: [u32; Category::COUNT],
}

impl CategoryTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, category: Category) {
        let count = &mut self.counts[category.canonical_index()];
        *count = count.saturating_add(1);
    }

    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        self.counts[category.canonical_index()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// `(category, count)` pairs in canonical order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(|category| (category, self.get(category)))
    }

    /// Categories ranked by descending count; ties keep canonical order.
    #[must_use]
    pub fn ranked(&self) -> [Category; Category::COUNT] {
        let mut ranked = Category::ALL;
        // Stable sort over the canonical list is what makes ties deterministic.
        ranked.sort_by(|a, b| self.get(*b).cmp(&self.get(*a)));
        ranked
    }
}

impl FromIterator<(Category, u32)> for CategoryTally {
    fn from_iter<I: IntoIterator<Item = (Category, u32)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (category, count) in iter {
            tally.counts[category.canonical_index()] = count;
        }
        tally
    }
}

/// Ranked outcome of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringResult {
    pub primary: CategoryProfile,
    pub secondary: CategoryProfile,
    pub scores: CategoryTally,
}
