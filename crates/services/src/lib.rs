#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod quiz_service;
pub mod view;

pub use quiz_core::Clock;

pub use config::QuizServiceConfig;
pub use controller::QuizController;
pub use error::{ConfigError, ControllerError, QuizAction, QuizServiceError};
pub use quiz_service::{HttpQuizService, QuizService, ScriptedQuizService};
pub use view::{QuestionView, QuizProgress, SessionView};
