//! Handlers for the `/pages` resource.
//!
//! Admin CRUD over content pages and their translation sets, plus the bulk
//! operations the admin panel's multi-select actions use. All input
//! validation happens here, before any store access.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use calcsite_core::error::CoreError;
use calcsite_core::related::{validate_related_count, RelatedMode};
use calcsite_core::rules::{validate_category, validate_locale, validate_slug};
use calcsite_core::types::DbId;
use calcsite_db::models::page::{BulkImportRow, CreatePage, TranslationInput, UpdatePage};
use calcsite_db::repositories::page_repo::PageFilter;
use calcsite_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::query::ListPagesParams;
use crate::response::{AffectedResponse, DataResponse};
use crate::state::AppState;

/// Request body for bulk delete and translation cleanup.
#[derive(Debug, Deserialize)]
pub struct IdListRequest {
    pub ids: Vec<DbId>,
}

/// Request body for bulk publish/unpublish.
#[derive(Debug, Deserialize)]
pub struct BulkPublishRequest {
    pub ids: Vec<DbId>,
    pub published: bool,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_translations(translations: &[TranslationInput]) -> Result<(), CoreError> {
    for translation in translations {
        validate_locale(&translation.locale)?;
        if translation.title.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Translation '{}' must have a title",
                translation.locale
            )));
        }
    }
    Ok(())
}

fn validate_create(input: &CreatePage) -> Result<(), CoreError> {
    validate_category(&input.category)?;
    validate_slug(&input.slug)?;
    if let Some(ref mode) = input.related_mode {
        RelatedMode::parse(mode)?;
    }
    if let Some(count) = input.related_count {
        validate_related_count(count)?;
    }
    validate_translations(&input.translations)
}

fn validate_update(input: &UpdatePage) -> Result<(), CoreError> {
    if let Some(ref mode) = input.related_mode {
        RelatedMode::parse(mode)?;
    }
    if let Some(count) = input.related_count {
        validate_related_count(count)?;
    }
    if let Some(ref translations) = input.translations {
        validate_translations(translations)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/pages?category=&published=
///
/// List pages with their translations, optionally filtered.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListPagesParams>,
) -> AppResult<impl IntoResponse> {
    let filter = PageFilter {
        category: params.category,
        published: params.published,
    };
    let pages = PageRepo::list_with_translations(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// POST /api/v1/pages
///
/// Create a new page with its full translation set. Starts unpublished
/// unless the payload says otherwise.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let page = PageRepo::create(&state.pool, &input).await?;
    let with_translations = PageRepo::find_by_id_with_translations(&state.pool, page.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page.id,
        }))?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: with_translations,
        }),
    ))
}

/// GET /api/v1/pages/{id}
///
/// Get a single page by ID with its translations.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_id_with_translations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/pages/by-path/{category}/{slug}
///
/// Get a single page by its natural key with its translations.
pub async fn get_by_category_slug(
    State(state): State<AppState>,
    Path((category, slug)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_category_slug_with_translations(&state.pool, &category, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No page at '{category}/{slug}'")))?;
    Ok(Json(DataResponse { data: page }))
}

/// PUT /api/v1/pages/{id}
///
/// Update a page. If `translations` is present, the whole translation set
/// is replaced. Category and slug are immutable.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    PageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    let with_translations = PageRepo::find_by_id_with_translations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(DataResponse {
        data: with_translations,
    }))
}

/// DELETE /api/v1/pages/{id}
///
/// Delete a page and all its translations.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PageRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Page", id }))
    }
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

/// POST /api/v1/pages/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(body): Json<IdListRequest>,
) -> AppResult<impl IntoResponse> {
    let affected = PageRepo::bulk_delete(&state.pool, &body.ids).await?;
    Ok(Json(DataResponse {
        data: AffectedResponse { affected },
    }))
}

/// POST /api/v1/pages/bulk-publish
pub async fn bulk_publish(
    State(state): State<AppState>,
    Json(body): Json<BulkPublishRequest>,
) -> AppResult<impl IntoResponse> {
    let affected = PageRepo::bulk_publish(&state.pool, &body.ids, body.published).await?;
    Ok(Json(DataResponse {
        data: AffectedResponse { affected },
    }))
}

/// POST /api/v1/pages/bulk-import
///
/// Import pages from an array of rows, skipping existing (category, slug)
/// pairs. Each created page gets an English translation.
pub async fn bulk_import(
    State(state): State<AppState>,
    Json(rows): Json<Vec<BulkImportRow>>,
) -> AppResult<impl IntoResponse> {
    for row in &rows {
        validate_category(&row.category)?;
        validate_slug(&row.slug)?;
    }

    let outcome = PageRepo::bulk_import(&state.pool, &rows).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/pages/clean-translations
///
/// Delete every non-English translation for the given pages.
pub async fn clean_translations(
    State(state): State<AppState>,
    Json(body): Json<IdListRequest>,
) -> AppResult<impl IntoResponse> {
    let affected = PageRepo::clean_translations(&state.pool, &body.ids).await?;
    Ok(Json(DataResponse {
        data: AffectedResponse { affected },
    }))
}
