//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use quiz_core::SessionError;

/// Errors emitted by a `QuizService` implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("quiz service responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("quiz service returned no questions")]
    EmptyQuiz,
    #[error("quiz service unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted while building a `QuizServiceConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid quiz service URL: {raw}")]
    InvalidBaseUrl { raw: String },
    #[error("unsupported URL scheme {scheme:?}; expected http or https")]
    UnsupportedScheme { scheme: String },
    #[error("invalid timeout (whole seconds, greater than zero): {raw}")]
    InvalidTimeout { raw: String },
}

/// Which outbound call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Generate,
    Submit,
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizAction::Generate => f.write_str("generating"),
            QuizAction::Submit => f.write_str("submitting"),
        }
    }
}

/// Errors emitted by `QuizController`. None of them leave the session inconsistent.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    /// A local precondition failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] SessionError),
    /// The quiz service call failed; the session is unchanged.
    #[error("quiz service failed while {action} quiz")]
    Service {
        action: QuizAction,
        #[source]
        source: QuizServiceError,
    },
    /// Another generate/submit call is still outstanding.
    #[error("a quiz request is already in flight")]
    Busy,
}

impl ControllerError {
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, ControllerError::Validation(_))
    }

    #[must_use]
    pub fn is_service(&self) -> bool {
        matches!(self, ControllerError::Service { .. })
    }

    /// Message suitable for showing to the person taking the quiz.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            ControllerError::Validation(
                SessionError::MissingTopic | SessionError::MissingLevel,
            ) => "Please select both topic and level".to_owned(),
            ControllerError::Validation(SessionError::IncompleteAnswers { .. }) => {
                "Please answer all questions before submitting".to_owned()
            }
            ControllerError::Validation(err) => format!("Invalid action: {err}"),
            ControllerError::Service { action, source } => {
                format!("Error {action} quiz: {source}")
            }
            ControllerError::Busy => "Please wait for the current request to finish".to_owned(),
        }
    }
}
