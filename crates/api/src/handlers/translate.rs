//! Handler for page translation jobs.
//!
//! Builds a job from the page's English translation, runs it through the
//! configured backend with slot-exhaustion retries, and replaces the
//! target locale's translation row with the result.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use calcsite_core::error::CoreError;
use calcsite_core::locale::DEFAULT_LOCALE;
use calcsite_core::rules::validate_locale;
use calcsite_core::types::DbId;
use calcsite_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::translate::{translate_with_retry, RetryPolicy, TranslateError, TranslationJob};

/// Request body for a translation job.
#[derive(Debug, Deserialize)]
pub struct TranslatePageRequest {
    pub target_locale: String,
}

/// POST /api/v1/pages/{id}/translate
///
/// Translate a page's English content into `target_locale` and store the
/// result as that locale's translation row.
pub async fn translate_page(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<TranslatePageRequest>,
) -> AppResult<impl IntoResponse> {
    validate_locale(&body.target_locale)?;
    if body.target_locale == DEFAULT_LOCALE {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot translate into the source locale".to_string(),
        )));
    }

    let page = PageRepo::find_by_id_with_translations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    let source = page
        .translations
        .iter()
        .find(|t| t.locale == DEFAULT_LOCALE)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Page has no English translation to translate from".to_string(),
            ))
        })?;

    let job = TranslationJob {
        target_locale: body.target_locale.clone(),
        title: source.title.clone(),
        description: source.description.clone(),
        body: source.body.clone(),
        faq_items: source.faq(),
    };

    let content = translate_with_retry(state.translator.as_ref(), &job, &RetryPolicy::default())
        .await
        .map_err(|err| match err {
            TranslateError::NotConfigured => {
                AppError::BadRequest("No translation backend configured".to_string())
            }
            other => AppError::InternalError(other.to_string()),
        })?;

    let input = content.into_translation_input(&job);
    PageRepo::upsert_translation(&state.pool, id, &input).await?;

    let with_translations = PageRepo::find_by_id_with_translations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(DataResponse {
        data: with_translations,
    }))
}
