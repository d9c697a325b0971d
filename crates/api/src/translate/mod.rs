//! Translation jobs against a chat-completion backend.
//!
//! The backend is slow (minutes per job) and occasionally reports that no
//! inference slot is free; that error class is retried on a fixed delay
//! while every other failure surfaces immediately. Responses are partial
//! by contract: any field the model omits falls back to the English source.

pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use calcsite_core::content::FaqItem;
use calcsite_db::models::page::TranslationInput;

pub use http::HttpTranslator;

// ---------------------------------------------------------------------------
// Job payloads
// ---------------------------------------------------------------------------

/// A translation request: the English source plus the target locale.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationJob {
    pub target_locale: String,
    pub title: String,
    pub description: Option<String>,
    pub body: Option<String>,
    pub faq_items: Vec<FaqItem>,
}

/// The backend's response. Every field is optional; absent fields fall
/// back to the English source when the response is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslatedContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub faq_items: Option<Vec<FaqItem>>,
}

impl TranslatedContent {
    /// Fold into a translation row for the target locale, taking the
    /// English source for any field the model omitted.
    pub fn into_translation_input(self, job: &TranslationJob) -> TranslationInput {
        TranslationInput {
            locale: job.target_locale.clone(),
            title: self.title.unwrap_or_else(|| job.title.clone()),
            display_title: None,
            description: self.description.or_else(|| job.description.clone()),
            body: self.body.or_else(|| job.body.clone()),
            faq_items: Some(self.faq_items.unwrap_or_else(|| job.faq_items.clone())),
            related_overrides: None,
            label_overrides: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors and retry policy
// ---------------------------------------------------------------------------

/// Marker substring the backend uses when every inference slot is busy.
const SLOT_EXHAUSTED_MARKER: &str = "no capacity slot";

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The request failed or the backend answered with an error status.
    #[error("Translation request failed: {0}")]
    Request(String),

    /// The backend answered 2xx but the payload did not parse.
    #[error("Translation payload malformed: {0}")]
    Payload(String),

    /// No backend URL is configured for this deployment.
    #[error("No translation backend configured")]
    NotConfigured,
}

/// Whether `err` is the retryable slot-exhaustion class, recognized by
/// substring match on the backend's error message.
pub fn is_slot_exhausted(err: &TranslateError) -> bool {
    matches!(err, TranslateError::Request(msg) if msg.contains(SLOT_EXHAUSTED_MARKER))
}

/// Tunable parameters for the fixed-delay retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            delay: Duration::from_secs(30),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend interface
// ---------------------------------------------------------------------------

/// A translation backend. Production uses [`HttpTranslator`]; tests inject
/// scripted fakes.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, job: &TranslationJob) -> Result<TranslatedContent, TranslateError>;
}

/// Backend used when `TRANSLATOR_URL` is unset; every job fails with
/// [`TranslateError::NotConfigured`].
pub struct DisabledTranslator;

#[async_trait]
impl TranslationBackend for DisabledTranslator {
    async fn translate(&self, _job: &TranslationJob) -> Result<TranslatedContent, TranslateError> {
        Err(TranslateError::NotConfigured)
    }
}

/// Run `job` against `backend`, retrying only slot-exhaustion failures.
///
/// At most `policy.max_retries` retries with a fixed delay between
/// attempts; every other error class fails immediately.
pub async fn translate_with_retry(
    backend: &dyn TranslationBackend,
    job: &TranslationJob,
    policy: &RetryPolicy,
) -> Result<TranslatedContent, TranslateError> {
    let mut attempt = 0u32;
    loop {
        match backend.translate(job).await {
            Ok(content) => return Ok(content),
            Err(err) if is_slot_exhausted(&err) && attempt < policy.max_retries => {
                attempt += 1;
                tracing::warn!(
                    attempt,
                    target_locale = %job.target_locale,
                    error = %err,
                    "Translation slot busy, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
