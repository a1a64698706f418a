use serde::{Deserialize, Serialize};

/// Scored outcome returned by the quiz service for a submission.
///
/// Stored verbatim: the score is not clamped and `details` keeps the service's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
    pub details: Vec<ResultDetail>,
}

/// Per-question feedback. `correct_answer` is normally present only when `correct` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetail {
    pub question: String,
    pub correct: bool,
    pub user_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl QuizResults {
    /// Number of questions scored, falling back to the detail count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total_questions
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(self.details.len())
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.details.iter().filter(|d| d.correct).count()
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Coarse grading of a score for feedback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    KeepPracticing,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 7 => Self::Excellent,
            s if s >= 5 => Self::Good,
            _ => Self::KeepPracticing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent work!",
            ScoreBand::Good => "Good effort!",
            ScoreBand::KeepPracticing => "Keep practicing!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds() {
        assert_eq!(ScoreBand::from_score(10), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(7), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(6), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(5), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(4), ScoreBand::KeepPracticing);
        assert_eq!(ScoreBand::from_score(-1), ScoreBand::KeepPracticing);
    }

    #[test]
    fn decodes_results_with_optional_fields() {
        let json = r#"{
            "score": 1,
            "totalQuestions": 2,
            "details": [
                {"question": "a?", "correct": true, "userAnswer": "x", "correctAnswer": "x"},
                {"question": "b?", "correct": false, "userAnswer": "y", "correctAnswer": "z"}
            ]
        }"#;
        let results: QuizResults = serde_json::from_str(json).unwrap();

        assert_eq!(results.total(), 2);
        assert_eq!(results.correct_count(), 1);
        assert_eq!(results.details[1].correct_answer.as_deref(), Some("z"));
    }

    #[test]
    fn total_falls_back_to_detail_count() {
        let json = r#"{"score": 12, "details": [
            {"question": "a?", "correct": true, "userAnswer": "x"}
        ]}"#;
        let results: QuizResults = serde_json::from_str(json).unwrap();

        assert_eq!(results.score, 12);
        assert_eq!(results.total(), 1);
        assert_eq!(results.details[0].correct_answer, None);
    }
}
