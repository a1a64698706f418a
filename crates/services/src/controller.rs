use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::{Level, Topic};
use quiz_core::{Clock, Session, SessionError};

use crate::error::{ControllerError, QuizAction, QuizServiceError};
use crate::quiz_service::QuizService;
use crate::view::SessionView;

//
// ─── IN-FLIGHT GUARD ───────────────────────────────────────────────────────────
//

/// Holds the single request slot until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ControllerError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ControllerError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the quiz session and mediates the two calls to the quiz service.
///
/// At most one generate/submit request is outstanding at a time. While it is,
/// every other mutating operation fails with `ControllerError::Busy`. The session
/// lock is never held across an `.await`; the in-flight flag is only taken or
/// inspected while holding it, so no mutation can slip in between building a
/// request and applying its reply.
pub struct QuizController {
    service: Arc<dyn QuizService>,
    clock: Clock,
    session: Mutex<Session>,
    in_flight: AtomicBool,
}

impl QuizController {
    #[must_use]
    pub fn new(service: Arc<dyn QuizService>, clock: Clock) -> Self {
        Self {
            service,
            clock,
            session: Mutex::new(Session::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the session for a local mutation, refusing while a request is outstanding.
    fn session_for_update(&self) -> Result<MutexGuard<'_, Session>, ControllerError> {
        let session = self.session();
        if self.is_loading() {
            log::warn!("rejected session update while a request is in flight");
            return Err(ControllerError::Busy);
        }
        Ok(session)
    }

    /// True while a generate or submit request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session().clone()
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        let session = self.session();
        SessionView::from_session(&session, self.is_loading())
    }

    /// Set the topic for the next quiz.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` for a blank topic or outside the
    /// selecting phase, `ControllerError::Busy` while a request is outstanding.
    pub fn select_topic(&self, topic: &str) -> Result<(), ControllerError> {
        let topic = Topic::new(topic).map_err(SessionError::from)?;
        self.session_for_update()?.select_topic(topic)?;
        Ok(())
    }

    /// Set the difficulty for the next quiz.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` outside the selecting phase,
    /// `ControllerError::Busy` while a request is outstanding.
    pub fn select_level(&self, level: Level) -> Result<(), ControllerError> {
        self.session_for_update()?.select_level(level)?;
        Ok(())
    }

    /// Ask the quiz service for a question set and start the quiz.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` without calling the service when the
    /// topic or level is missing, `ControllerError::Service` if the call fails
    /// (the session stays in the selecting phase), or `ControllerError::Busy`.
    pub async fn generate(&self) -> Result<(), ControllerError> {
        let (request, _slot) = {
            let session = self.session();
            let slot = InFlight::acquire(&self.in_flight)?;
            let request = session.generate_request().inspect_err(|err| {
                log::debug!("generate rejected: {err}");
            })?;
            (request, slot)
        };

        log::debug!("generating {} quiz on {}", request.level, request.topic);
        let quiz = self
            .service
            .generate(&request)
            .await
            .map_err(|source| service_failure(QuizAction::Generate, source))?;

        let quiz_id = quiz.quiz_id.clone();
        let count = quiz.questions.len();
        self.session()
            .apply_generated(quiz, self.clock.now())
            .map_err(|err| match err {
                SessionError::EmptyQuiz => {
                    service_failure(QuizAction::Generate, QuizServiceError::EmptyQuiz)
                }
                other => ControllerError::Validation(other),
            })?;

        log::info!("quiz {quiz_id} started with {count} questions");
        Ok(())
    }

    /// Record an answer for the current quiz, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` for out-of-range indices or outside
    /// the in-progress phase, `ControllerError::Busy` while a request is outstanding.
    pub fn select_answer(&self, question: usize, option: usize) -> Result<(), ControllerError> {
        self.session_for_update()?.select_answer(question, option)?;
        Ok(())
    }

    /// Send the completed answer map for scoring and store the results.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Validation` without calling the service when any
    /// question is unanswered, `ControllerError::Service` if the call fails (the
    /// quiz stays in progress), or `ControllerError::Busy`.
    pub async fn submit(&self) -> Result<(), ControllerError> {
        let (submission, _slot) = {
            let session = self.session();
            let slot = InFlight::acquire(&self.in_flight)?;
            let submission = session.submission().inspect_err(|err| {
                log::debug!("submit rejected: {err}");
            })?;
            (submission, slot)
        };

        log::debug!(
            "submitting {} answers for quiz {}",
            submission.answers.len(),
            submission.quiz_id
        );
        let results = self
            .service
            .submit(&submission)
            .await
            .map_err(|source| service_failure(QuizAction::Submit, source))?;

        let score = results.score;
        self.session().apply_results(results, self.clock.now())?;

        log::info!("quiz {} scored {score}", submission.quiz_id);
        Ok(())
    }

    /// Discard the session and return to topic selection.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Busy` while a request is outstanding; otherwise
    /// always succeeds.
    pub fn reset(&self) -> Result<(), ControllerError> {
        self.session_for_update()?.reset();
        log::debug!("session reset");
        Ok(())
    }
}

fn service_failure(action: QuizAction, source: QuizServiceError) -> ControllerError {
    log::warn!("quiz service failed while {action} quiz: {source}");
    ControllerError::Service { action, source }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("clock", &self.clock)
            .field("session", &*self.session())
            .field("in_flight", &self.is_loading())
            .finish_non_exhaustive()
    }
}
