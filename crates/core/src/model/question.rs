use serde::{Deserialize, Serialize};

use crate::model::QuizId;

/// A single multiple-choice question as produced by the quiz service.
///
/// Option order is meaningful: answers refer to options by their zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    options: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// Successful reply to a generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuiz {
    pub quiz_id: QuizId,
    pub questions: Vec<Question>,
}
