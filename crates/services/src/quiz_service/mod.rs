mod http;
mod scripted;

use async_trait::async_trait;

use quiz_core::model::{GeneratedQuiz, QuizResults};
use quiz_core::{GenerateRequest, Submission};

use crate::error::QuizServiceError;

pub use http::HttpQuizService;
pub use scripted::ScriptedQuizService;

/// Remote collaborator that generates question sets and scores submissions.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// Request a new question set for a topic and level.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` on transport failure or a non-success reply.
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedQuiz, QuizServiceError>;

    /// Score a completed answer map.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` on transport failure or a non-success reply.
    async fn submit(&self, submission: &Submission) -> Result<QuizResults, QuizServiceError>;
}
