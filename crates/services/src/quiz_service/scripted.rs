use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use quiz_core::model::{GeneratedQuiz, QuizResults};
use quiz_core::{GenerateRequest, Submission};

use super::QuizService;
use crate::error::QuizServiceError;

#[derive(Default)]
struct Script {
    generate_replies: VecDeque<Result<GeneratedQuiz, QuizServiceError>>,
    submit_replies: VecDeque<Result<QuizResults, QuizServiceError>>,
    generate_calls: Vec<GenerateRequest>,
    submit_calls: Vec<Submission>,
}

/// In-memory `QuizService` that replays queued replies and records every request.
///
/// A call with nothing queued fails with `QuizServiceError::Unavailable`.
#[derive(Default)]
pub struct ScriptedQuizService {
    script: Mutex<Script>,
}

impl ScriptedQuizService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_generate(&self, reply: Result<GeneratedQuiz, QuizServiceError>) {
        self.script().generate_replies.push_back(reply);
    }

    pub fn push_submit(&self, reply: Result<QuizResults, QuizServiceError>) {
        self.script().submit_replies.push_back(reply);
    }

    #[must_use]
    pub fn generate_calls(&self) -> Vec<GenerateRequest> {
        self.script().generate_calls.clone()
    }

    #[must_use]
    pub fn submit_calls(&self) -> Vec<Submission> {
        self.script().submit_calls.clone()
    }
}

#[async_trait]
impl QuizService for ScriptedQuizService {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedQuiz, QuizServiceError> {
        let mut script = self.script();
        script.generate_calls.push(request.clone());
        script
            .generate_replies
            .pop_front()
            .unwrap_or_else(|| {
                Err(QuizServiceError::Unavailable("no generate reply queued".into()))
            })
    }

    async fn submit(&self, submission: &Submission) -> Result<QuizResults, QuizServiceError> {
        let mut script = self.script();
        script.submit_calls.push(submission.clone());
        script
            .submit_replies
            .pop_front()
            .unwrap_or_else(|| Err(QuizServiceError::Unavailable("no submit reply queued".into())))
    }
}
