//! HTTP implementation of the translation backend.

use std::time::Duration;

use async_trait::async_trait;

use super::{TranslateError, TranslationBackend, TranslationJob, TranslatedContent};

/// Posts translation jobs as JSON to `{base_url}/translate`.
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslator {
    /// Build a client with the given request timeout.
    ///
    /// Jobs run against a chat-completion backend, so the timeout should be
    /// generous (the default configuration uses 30 minutes).
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslator {
    async fn translate(&self, job: &TranslationJob) -> Result<TranslatedContent, TranslateError> {
        let url = format!("{}/translate", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(job)
            .send()
            .await
            .map_err(|e| TranslateError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Keep the body: slot-exhaustion is recognized by substring
            // match on the backend's message.
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Request(format!(
                "backend returned {status}: {body}"
            )));
        }

        response
            .json::<TranslatedContent>()
            .await
            .map_err(|e| TranslateError::Payload(e.to_string()))
    }
}
