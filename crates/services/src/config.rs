use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api/quiz";
pub const BASE_URL_ENV: &str = "QUIZGEN_SERVICE_URL";
pub const TIMEOUT_ENV: &str = "QUIZGEN_TIMEOUT_SECS";

/// Where the quiz service lives and how long to wait for it.
///
/// `timeout` is `None` by default: requests wait on the transport alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizServiceConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for QuizServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
        }
    }
}

impl QuizServiceConfig {
    /// Build a config for the given base URL (e.g. `http://host:8081/api/quiz`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or is not http(s).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim();
        let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl {
            raw: raw.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: parsed.scheme().to_owned(),
            });
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_owned(),
            timeout: None,
        })
    }

    /// Read `QUIZGEN_SERVICE_URL` and `QUIZGEN_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either variable is set to an invalid value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(url)?,
            None => Self::default(),
        };
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            config.timeout = Some(parse_timeout_secs(&raw)?);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Parse a whole, positive number of seconds.
///
/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` for zero, negative or non-numeric input.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            raw: raw.to_owned(),
        }),
    }
}
