use std::sync::Arc;

use quiz_core::model::{
    AnswerMap, GeneratedQuiz, Level, Question, QuizId, QuizResults, ResultDetail, ScoreBand,
};
use quiz_core::time::{fixed_clock, fixed_now};
use quiz_core::{Phase, Session, SessionError};
use services::{ControllerError, QuizAction, QuizController, QuizServiceError, ScriptedQuizService};

fn controller() -> (Arc<ScriptedQuizService>, QuizController) {
    let service = Arc::new(ScriptedQuizService::new());
    let controller = QuizController::new(service.clone(), fixed_clock());
    (service, controller)
}

fn question(text: &str, options: &[&str]) -> Question {
    Question::new(text, options.iter().map(|o| (*o).to_string()).collect())
}

fn javascript_quiz() -> GeneratedQuiz {
    GeneratedQuiz {
        quiz_id: QuizId::new("js-1"),
        questions: vec![
            question("Which value is falsy?", &["'0'", "0", "[]"]),
            question("Arrow functions bind `this`...", &["lexically", "dynamically"]),
        ],
    }
}

fn arithmetic_quiz() -> GeneratedQuiz {
    GeneratedQuiz {
        quiz_id: QuizId::new("q1"),
        questions: vec![question("2+2?", &["3", "4"])],
    }
}

fn perfect_score() -> QuizResults {
    QuizResults {
        score: 10,
        total_questions: None,
        details: vec![ResultDetail {
            question: "2+2?".into(),
            correct: true,
            user_answer: "4".into(),
            correct_answer: None,
        }],
    }
}

fn server_error() -> QuizServiceError {
    QuizServiceError::HttpStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
}

async fn start(controller: &QuizController, topic: &str, level: Level) {
    controller.select_topic(topic).unwrap();
    controller.select_level(level).unwrap();
    controller.generate().await.unwrap();
}

#[tokio::test]
async fn generate_without_full_selection_sends_nothing() {
    let (service, controller) = controller();

    let err = controller.generate().await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Validation(SessionError::MissingTopic)
    ));
    assert_eq!(err.notice(), "Please select both topic and level");

    controller.select_topic("Java").unwrap();
    let before = controller.snapshot();
    let err = controller.generate().await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Validation(SessionError::MissingLevel)
    ));

    assert_eq!(controller.snapshot(), before);
    assert!(service.generate_calls().is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn blank_topic_is_a_validation_error() {
    let (_service, controller) = controller();
    let err = controller.select_topic("   ").unwrap_err();
    assert!(err.is_validation());
    assert!(controller.snapshot().topic().is_none());
}

#[tokio::test]
async fn submit_with_missing_answers_sends_nothing() {
    let (service, controller) = controller();
    service.push_generate(Ok(javascript_quiz()));
    start(&controller, "JavaScript", Level::Beginner).await;

    let err = controller.submit().await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Validation(SessionError::IncompleteAnswers {
            answered: 0,
            total: 2
        })
    ));

    controller.select_answer(1, 1).unwrap();
    let err = controller.submit().await.unwrap_err();
    assert_eq!(err.notice(), "Please answer all questions before submitting");

    assert_eq!(controller.snapshot().phase(), Phase::InProgress);
    assert!(service.submit_calls().is_empty());
}

#[tokio::test]
async fn reselecting_an_answer_overwrites_it() {
    let (service, controller) = controller();
    service.push_generate(Ok(javascript_quiz()));
    start(&controller, "JavaScript", Level::Beginner).await;

    controller.select_answer(0, 0).unwrap();
    controller.select_answer(0, 2).unwrap();

    let session = controller.snapshot();
    let answers = session.answers().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get(0), Some(2));
}

#[tokio::test]
async fn out_of_range_answer_leaves_session_untouched() {
    let (service, controller) = controller();
    service.push_generate(Ok(javascript_quiz()));
    start(&controller, "JavaScript", Level::Beginner).await;

    let before = controller.snapshot();
    assert!(controller.select_answer(5, 0).unwrap_err().is_validation());
    assert!(controller.select_answer(1, 9).unwrap_err().is_validation());
    assert_eq!(controller.snapshot(), before);
}

#[tokio::test]
async fn complete_answers_are_submitted_exactly_once() {
    let (service, controller) = controller();
    service.push_generate(Ok(javascript_quiz()));
    service.push_submit(Ok(QuizResults {
        score: 1,
        total_questions: Some(2),
        details: Vec::new(),
    }));
    start(&controller, "JavaScript", Level::Beginner).await;

    let generated = service.generate_calls();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].topic.as_str(), "JavaScript");
    assert_eq!(generated[0].level, Level::Beginner);

    controller.select_answer(0, 1).unwrap();
    controller.select_answer(1, 0).unwrap();
    controller.submit().await.unwrap();

    let submitted = service.submit_calls();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].quiz_id, QuizId::new("js-1"));
    assert_eq!(
        submitted[0].answers,
        [(0, 1), (1, 0)].into_iter().collect::<AnswerMap>()
    );
}

#[tokio::test]
async fn scenario_single_question_perfect_score() {
    let (service, controller) = controller();
    service.push_generate(Ok(arithmetic_quiz()));
    service.push_submit(Ok(perfect_score()));

    start(&controller, "DSA", Level::Beginner).await;
    controller.select_answer(0, 1).unwrap();
    controller.submit().await.unwrap();

    let session = controller.snapshot();
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.results(), Some(&perfect_score()));
    assert_eq!(session.completed_at(), Some(fixed_now()));

    let view = controller.view();
    assert_eq!(view.band(), Some(ScoreBand::Excellent));
    assert!(!view.loading);
}

#[tokio::test]
async fn scenario_generate_failure_keeps_selection() {
    let (service, controller) = controller();
    service.push_generate(Err(server_error()));

    controller.select_topic("Database").unwrap();
    controller.select_level(Level::Advanced).unwrap();
    let before = controller.snapshot();

    let err = controller.generate().await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Service {
            action: QuizAction::Generate,
            ..
        }
    ));
    assert!(err.notice().starts_with("Error generating quiz:"));

    let session = controller.snapshot();
    assert_eq!(session, before);
    assert_eq!(session.phase(), Phase::Selecting);
    assert!(session.quiz_id().is_none());
    assert!(session.questions().is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn empty_question_set_is_a_service_failure() {
    let (service, controller) = controller();
    service.push_generate(Ok(GeneratedQuiz {
        quiz_id: QuizId::new("nothing"),
        questions: Vec::new(),
    }));

    controller.select_topic("React").unwrap();
    controller.select_level(Level::Intermediate).unwrap();
    let err = controller.generate().await.unwrap_err();

    assert!(matches!(
        err,
        ControllerError::Service {
            source: QuizServiceError::EmptyQuiz,
            ..
        }
    ));
    assert_eq!(controller.snapshot().phase(), Phase::Selecting);
}

#[tokio::test]
async fn submit_failure_keeps_quiz_in_progress() {
    let (service, controller) = controller();
    service.push_generate(Ok(arithmetic_quiz()));
    service.push_submit(Err(server_error()));
    service.push_submit(Ok(perfect_score()));

    start(&controller, "DSA", Level::Beginner).await;
    controller.select_answer(0, 1).unwrap();
    let before = controller.snapshot();

    let err = controller.submit().await.unwrap_err();
    assert!(err.is_service());
    assert!(err.notice().starts_with("Error submitting quiz:"));
    assert_eq!(controller.snapshot(), before);

    controller.submit().await.unwrap();
    assert_eq!(controller.snapshot().phase(), Phase::Completed);
    assert_eq!(service.submit_calls().len(), 2);
}

#[tokio::test]
async fn scenario_reset_then_new_quiz_has_no_residue() {
    let (service, controller) = controller();
    service.push_generate(Ok(arithmetic_quiz()));
    service.push_submit(Ok(perfect_score()));
    service.push_generate(Ok(javascript_quiz()));

    start(&controller, "DSA", Level::Beginner).await;
    controller.select_answer(0, 1).unwrap();
    controller.submit().await.unwrap();

    controller.reset().unwrap();
    assert_eq!(controller.snapshot(), Session::new());

    start(&controller, "JavaScript", Level::Advanced).await;
    let session = controller.snapshot();
    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.topic().map(|t| t.as_str()), Some("JavaScript"));
    assert_eq!(session.level(), Some(Level::Advanced));
    assert_eq!(session.quiz_id(), Some(&QuizId::new("js-1")));
    assert_eq!(session.questions(), javascript_quiz().questions.as_slice());
    assert!(session.answers().unwrap().is_empty());
    assert!(session.results().is_none());
    assert!(session.completed_at().is_none());
}

#[tokio::test]
async fn reset_is_available_from_every_phase() {
    let (service, controller) = controller();
    service.push_generate(Ok(arithmetic_quiz()));

    controller.select_topic("Python").unwrap();
    controller.reset().unwrap();
    assert_eq!(controller.snapshot(), Session::new());

    start(&controller, "Python", Level::Beginner).await;
    controller.select_answer(0, 0).unwrap();
    controller.reset().unwrap();
    assert_eq!(controller.snapshot(), Session::new());
}

#[tokio::test]
async fn unqueued_reply_surfaces_as_service_error() {
    let (_service, controller) = controller();
    controller.select_topic("System Design").unwrap();
    controller.select_level(Level::Advanced).unwrap();

    let err = controller.generate().await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Service {
            source: QuizServiceError::Unavailable(_),
            ..
        }
    ));
}
