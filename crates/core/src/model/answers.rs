use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selected option per question, keyed by zero-based question index.
///
/// Keys are unique and a later selection for the same question replaces the
/// earlier one. On the wire keys are JSON strings (`{"0": 1}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<usize, usize>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` for `question`, returning the option it replaced.
    pub fn select(&mut self, question: usize, option: usize) -> Option<usize> {
        self.0.insert(question, option)
    }

    #[must_use]
    pub fn get(&self, question: usize) -> Option<usize> {
        self.0.get(&question).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every index in `0..question_count` has an answer.
    #[must_use]
    pub fn covers(&self, question_count: usize) -> bool {
        (0..question_count).all(|index| self.0.contains_key(&index))
    }
}

impl FromIterator<(usize, usize)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
