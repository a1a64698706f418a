use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use quiz_core::model::{GeneratedQuiz, Level, Question, QuizId, QuizResults};
use quiz_core::time::fixed_clock;
use quiz_core::{GenerateRequest, Phase, Submission};
use services::{ControllerError, QuizController, QuizService, QuizServiceError};

/// Holds every generate call open until the test releases it.
struct GatedService {
    entered: Notify,
    release: Notify,
    calls: Mutex<usize>,
}

impl GatedService {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl QuizService for GatedService {
    async fn generate(
        &self,
        _request: &GenerateRequest,
    ) -> Result<GeneratedQuiz, QuizServiceError> {
        *self.calls.lock().await += 1;
        self.entered.notify_one();
        self.release.notified().await;
        Ok(GeneratedQuiz {
            quiz_id: QuizId::new("slow"),
            questions: vec![Question::new("ready?", vec!["yes".into(), "no".into()])],
        })
    }

    async fn submit(&self, _submission: &Submission) -> Result<QuizResults, QuizServiceError> {
        Err(QuizServiceError::Unavailable("not used".into()))
    }
}

#[tokio::test]
async fn operations_are_rejected_while_a_request_is_outstanding() {
    let service = Arc::new(GatedService::new());
    let controller = Arc::new(QuizController::new(service.clone(), fixed_clock()));
    controller.select_topic("Java").unwrap();
    controller.select_level(Level::Beginner).unwrap();

    let pending = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.generate().await })
    };
    service.entered.notified().await;

    assert!(controller.is_loading());
    assert!(controller.view().loading);
    assert!(matches!(
        controller.generate().await.unwrap_err(),
        ControllerError::Busy
    ));
    assert!(matches!(controller.submit().await.unwrap_err(), ControllerError::Busy));
    assert!(matches!(
        controller.select_level(Level::Advanced).unwrap_err(),
        ControllerError::Busy
    ));
    assert!(matches!(controller.reset().unwrap_err(), ControllerError::Busy));
    assert_eq!(controller.snapshot().phase(), Phase::Selecting);

    service.release.notify_one();
    pending.await.unwrap().unwrap();

    assert!(!controller.is_loading());
    assert_eq!(*service.calls.lock().await, 1);
    let session = controller.snapshot();
    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.level(), Some(Level::Beginner));
}
