use std::time::Duration;

use clap::Parser;

use quiz_core::model::{Level, LevelError};
use services::config::{TIMEOUT_ENV, parse_timeout_secs};
use services::{ConfigError, ControllerError, QuizController, QuizServiceConfig};

/// Take AI-generated multiple-choice quizzes from the terminal.
#[derive(Debug, Parser)]
#[command(name = "quizgen", version)]
pub struct Args {
    /// Base URL of the quiz service [env: QUIZGEN_SERVICE_URL]
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// Give up on a quiz service request after this many seconds [env: QUIZGEN_TIMEOUT_SECS]
    #[arg(long = "timeout-secs", value_name = "SECS", value_parser = parse_timeout_secs)]
    pub timeout: Option<Duration>,

    /// Preselect the quiz topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Preselect the difficulty (beginner, intermediate, advanced)
    #[arg(long, value_parser = parse_level)]
    pub level: Option<Level>,
}

fn parse_level(raw: &str) -> Result<Level, LevelError> {
    raw.parse()
}

impl Args {
    /// Environment config with command-line flags layered on top.
    pub fn service_config(&self) -> Result<QuizServiceConfig, ConfigError> {
        self.service_config_from(|key| std::env::var(key).ok())
    }

    fn service_config_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<QuizServiceConfig, ConfigError> {
        let mut config = match &self.service_url {
            // The flag replaces QUIZGEN_SERVICE_URL, so that variable is never parsed.
            Some(url) => {
                let timeout = match lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
                    Some(raw) => Some(parse_timeout_secs(&raw)?),
                    None => None,
                };
                QuizServiceConfig::new(url.as_str())?.with_timeout(timeout)
            }
            None => QuizServiceConfig::from_lookup(lookup)?,
        };
        if self.timeout.is_some() {
            config = config.with_timeout(self.timeout);
        }
        Ok(config)
    }

    /// Apply `--topic` / `--level` to a fresh controller.
    pub fn preselect(&self, controller: &QuizController) -> Result<(), ControllerError> {
        if let Some(topic) = &self.topic {
            controller.select_topic(topic)?;
        }
        if let Some(level) = self.level {
            controller.select_level(level)?;
        }
        Ok(())
    }
}
