use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::model::{
    AnswerMap, GeneratedQuiz, Level, Question, QuizId, QuizResults, Topic, TopicError,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A local precondition of a session transition was not met.
///
/// A failed transition never modifies the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {operation} while the session is {phase}")]
    WrongPhase { operation: &'static str, phase: Phase },

    #[error("no topic selected")]
    MissingTopic,

    #[error("no difficulty level selected")]
    MissingLevel,

    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("only {answered} of {total} questions answered")]
    IncompleteAnswers { answered: usize, total: usize },

    #[error("question {index} does not exist (quiz has {count})")]
    QuestionOutOfRange { index: usize, count: usize },

    #[error("option {index} does not exist for question {question} (it has {count})")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        count: usize,
    },

    #[error("quiz contains no questions")]
    EmptyQuiz,
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Discrete stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Selecting,
    InProgress,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Selecting => "selecting",
            Phase::InProgress => "in progress",
            Phase::Completed => "completed",
        };
        f.write_str(label)
    }
}

//
// ─── OUTBOUND REQUESTS ─────────────────────────────────────────────────────────
//

/// Body of a generate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub topic: Topic,
    pub level: Level,
}

/// Body of a submit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub quiz_id: QuizId,
    pub answers: AnswerMap,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveQuiz {
    quiz_id: QuizId,
    questions: Vec<Question>,
    answers: AnswerMap,
    generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Selecting,
    InProgress(ActiveQuiz),
    Completed {
        quiz: ActiveQuiz,
        results: QuizResults,
        completed_at: DateTime<Utc>,
    },
}

/// One quiz-taking attempt, from topic selection through results.
///
/// Every method is a pure transition over the owned value: preconditions are
/// checked first and the session is left untouched when one fails. Network
/// calls happen elsewhere; `generate_request`/`submission` build the outbound
/// payloads and `apply_generated`/`apply_results` fold the replies back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    topic: Option<Topic>,
    level: Option<Level>,
    stage: Stage,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// The canonical empty session in the selecting phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            topic: None,
            level: None,
            stage: Stage::Selecting,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Selecting => Phase::Selecting,
            Stage::InProgress(_) => Phase::InProgress,
            Stage::Completed { .. } => Phase::Completed,
        }
    }

    #[must_use]
    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    #[must_use]
    pub fn quiz_id(&self) -> Option<&QuizId> {
        self.active().map(|quiz| &quiz.quiz_id)
    }

    /// Questions of the current quiz; empty while selecting.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        self.active().map_or(&[], |quiz| quiz.questions.as_slice())
    }

    #[must_use]
    pub fn answers(&self) -> Option<&AnswerMap> {
        self.active().map(|quiz| &quiz.answers)
    }

    #[must_use]
    pub fn results(&self) -> Option<&QuizResults> {
        match &self.stage {
            Stage::Completed { results, .. } => Some(results),
            _ => None,
        }
    }

    #[must_use]
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.active().map(|quiz| quiz.generated_at)
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match &self.stage {
            Stage::Completed { completed_at, .. } => Some(*completed_at),
            _ => None,
        }
    }

    fn active(&self) -> Option<&ActiveQuiz> {
        match &self.stage {
            Stage::Selecting => None,
            Stage::InProgress(quiz) | Stage::Completed { quiz, .. } => Some(quiz),
        }
    }

    fn wrong_phase(&self, operation: &'static str) -> SessionError {
        SessionError::WrongPhase {
            operation,
            phase: self.phase(),
        }
    }

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), SessionError> {
        if self.phase() == phase {
            Ok(())
        } else {
            Err(self.wrong_phase(operation))
        }
    }

    fn in_progress(&self, operation: &'static str) -> Result<&ActiveQuiz, SessionError> {
        match &self.stage {
            Stage::InProgress(quiz) => Ok(quiz),
            _ => Err(self.wrong_phase(operation)),
        }
    }

    /// Set the pending topic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside the selecting phase.
    pub fn select_topic(&mut self, topic: Topic) -> Result<(), SessionError> {
        self.require(Phase::Selecting, "select a topic")?;
        self.topic = Some(topic);
        Ok(())
    }

    /// Set the pending difficulty level.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside the selecting phase.
    pub fn select_level(&mut self, level: Level) -> Result<(), SessionError> {
        self.require(Phase::Selecting, "select a level")?;
        self.level = Some(level);
        Ok(())
    }

    /// Validate the selection and build the generate payload.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingTopic` / `MissingLevel` when the selection is
    /// incomplete, or `WrongPhase` outside the selecting phase.
    pub fn generate_request(&self) -> Result<GenerateRequest, SessionError> {
        self.require(Phase::Selecting, "generate a quiz")?;
        let topic = self.topic.clone().ok_or(SessionError::MissingTopic)?;
        let level = self.level.ok_or(SessionError::MissingLevel)?;
        Ok(GenerateRequest { topic, level })
    }

    /// Store a freshly generated question set and start the quiz with no answers.
    ///
    /// # Errors
    ///
    /// Returns the `generate_request` errors, or `SessionError::EmptyQuiz` if the
    /// quiz has no questions.
    pub fn apply_generated(
        &mut self,
        quiz: GeneratedQuiz,
        generated_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.generate_request()?;
        if quiz.questions.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }

        self.stage = Stage::InProgress(ActiveQuiz {
            quiz_id: quiz.quiz_id,
            questions: quiz.questions,
            answers: AnswerMap::new(),
            generated_at,
        });
        Ok(())
    }

    /// Record the chosen option for a question, replacing any earlier choice.
    ///
    /// Returns the option that was replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` unless the quiz is in progress, or an
    /// out-of-range error when either index does not exist in the current quiz.
    pub fn select_answer(
        &mut self,
        question: usize,
        option: usize,
    ) -> Result<Option<usize>, SessionError> {
        let error = self.wrong_phase("answer a question");
        let Stage::InProgress(quiz) = &mut self.stage else {
            return Err(error);
        };

        let count = quiz.questions.len();
        let Some(target) = quiz.questions.get(question) else {
            return Err(SessionError::QuestionOutOfRange {
                index: question,
                count,
            });
        };
        if option >= target.option_count() {
            return Err(SessionError::OptionOutOfRange {
                question,
                index: option,
                count: target.option_count(),
            });
        }

        Ok(quiz.answers.select(question, option))
    }

    /// Validate that every question is answered and build the submit payload.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IncompleteAnswers` if any question lacks an answer,
    /// or `WrongPhase` unless the quiz is in progress.
    pub fn submission(&self) -> Result<Submission, SessionError> {
        let quiz = self.in_progress("submit answers")?;

        let total = quiz.questions.len();
        if !quiz.answers.covers(total) {
            return Err(SessionError::IncompleteAnswers {
                answered: quiz.answers.len(),
                total,
            });
        }

        Ok(Submission {
            quiz_id: quiz.quiz_id.clone(),
            answers: quiz.answers.clone(),
        })
    }

    /// Store the scored results and complete the session.
    ///
    /// # Errors
    ///
    /// Returns the same errors as `submission`.
    pub fn apply_results(
        &mut self,
        results: QuizResults,
        completed_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.submission()?;
        match std::mem::replace(&mut self.stage, Stage::Selecting) {
            Stage::InProgress(quiz) => {
                self.stage = Stage::Completed {
                    quiz,
                    results,
                    completed_at,
                };
                Ok(())
            }
            other => {
                self.stage = other;
                Err(self.wrong_phase("submit answers"))
            }
        }
    }

    /// Discard everything and return to the empty selecting state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
