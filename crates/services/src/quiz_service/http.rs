use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use quiz_core::model::{GeneratedQuiz, QuizResults};
use quiz_core::{GenerateRequest, Submission};

use super::QuizService;
use crate::config::QuizServiceConfig;
use crate::error::QuizServiceError;

/// `QuizService` over JSON/HTTP: `POST {base}/generate` and `POST {base}/submit`.
#[derive(Clone, Debug)]
pub struct HttpQuizService {
    client: Client,
    config: QuizServiceConfig,
}

impl HttpQuizService {
    /// # Errors
    ///
    /// Returns `QuizServiceError::Http` if the HTTP client cannot be built.
    pub fn new(config: QuizServiceConfig) -> Result<Self, QuizServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &QuizServiceConfig {
        &self.config
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, QuizServiceError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {url}");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("POST {url} failed with status {status}");
            return Err(QuizServiceError::HttpStatus(status));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QuizService for HttpQuizService {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedQuiz, QuizServiceError> {
        self.post("generate", request).await
    }

    async fn submit(&self, submission: &Submission) -> Result<QuizResults, QuizServiceError> {
        self.post("submit", submission).await
    }
}
