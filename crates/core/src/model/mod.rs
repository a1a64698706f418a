mod answers;
mod ids;
mod level;
mod question;
mod results;
mod topic;

pub use answers::AnswerMap;
pub use ids::QuizId;
pub use level::{Level, LevelError};
pub use question::{GeneratedQuiz, Question};
pub use results::{QuizResults, ResultDetail, ScoreBand};
pub use topic::{SUGGESTED_TOPICS, Topic, TopicError};
