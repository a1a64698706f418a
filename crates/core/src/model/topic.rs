use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Topics front-ends offer by default. Any other non-empty topic is accepted too.
pub const SUGGESTED_TOPICS: [&str; 8] = [
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Spring Boot",
    "Database",
    "DSA",
    "System Design",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic must not be empty")]
    Empty,
}

/// Subject of a quiz. Guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
    /// Build a topic from user input.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::Empty` if the trimmed input is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, TopicError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Topic {
    type Error = TopicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
