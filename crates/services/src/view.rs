use chrono::{DateTime, Utc};

use quiz_core::model::{Level, QuizId, QuizResults, ScoreBand};
use quiz_core::{Phase, Session};

/// Read-only snapshot handed to the rendering layer.
///
/// Presentation-agnostic: no pre-formatted strings, the renderer decides layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: Phase,
    pub topic: Option<String>,
    pub level: Option<Level>,
    pub quiz_id: Option<QuizId>,
    pub questions: Vec<QuestionView>,
    pub progress: QuizProgress,
    pub results: Option<QuizResults>,
    pub loading: bool,
    pub generated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// One question with the option currently chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
}

/// Aggregated answer progress, useful for enabling the submit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.answered >= self.total
    }
}

impl SessionView {
    #[must_use]
    pub fn from_session(session: &Session, loading: bool) -> Self {
        let answers = session.answers();
        let questions: Vec<QuestionView> = session
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionView {
                index,
                text: question.text().to_owned(),
                options: question.options().to_vec(),
                selected: answers.and_then(|a| a.get(index)),
            })
            .collect();
        let progress = QuizProgress {
            answered: answers.map_or(0, |a| a.len()),
            total: questions.len(),
        };

        Self {
            phase: session.phase(),
            topic: session.topic().map(|t| t.as_str().to_owned()),
            level: session.level(),
            quiz_id: session.quiz_id().cloned(),
            questions,
            progress,
            results: session.results().cloned(),
            loading,
            generated_at: session.generated_at(),
            completed_at: session.completed_at(),
        }
    }

    #[must_use]
    pub fn band(&self) -> Option<ScoreBand> {
        self.results.as_ref().map(QuizResults::band)
    }
}
