//! Handler for related-calculator resolution.
//!
//! One call per page render: loads the page's configuration and curated
//! list, builds the locale-resolved candidate pool from the static registry
//! and all published pages, and resolves the final list per the page's mode.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use calcsite_core::catalog::resolve_static_entries;
use calcsite_core::related::{merge_with_precedence, resolve_related, RelatedCalculatorEntry, RelatedMode};
use calcsite_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::query::LocaleParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Build the full candidate pool for `locale`.
///
/// Message-bundle failures degrade inside [`MessageStore::load`]; a store
/// failure propagates so the caller decides whether to fail the render or
/// skip the section.
///
/// [`MessageStore::load`]: calcsite_core::messages::MessageStore::load
pub async fn build_candidate_pool(
    state: &AppState,
    locale: &str,
) -> Result<Vec<RelatedCalculatorEntry>, sqlx::Error> {
    let bundle = state.messages.load(locale);
    let static_entries = resolve_static_entries(&bundle);

    let pages = PageRepo::list_published_with_translations(&state.pool).await?;
    let page_entries: Vec<RelatedCalculatorEntry> =
        pages.iter().map(|p| p.related_entry(locale)).collect();

    // Page-sourced entries replace static ones sharing a path.
    Ok(merge_with_precedence(static_entries, page_entries))
}

/// GET /api/v1/related/{category}/{slug}?locale=
///
/// Resolve the related-calculator list for one published page.
pub async fn for_page(
    State(state): State<AppState>,
    Path((category, slug)): Path<(String, String)>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_category_slug_with_translations(&state.pool, &category, &slug)
        .await?
        .filter(|p| p.page.published)
        .ok_or_else(|| AppError::NotFound(format!("No published page at '{category}/{slug}'")))?;

    // The CHECK constraint keeps persisted modes valid; fall back to manual
    // rather than failing the render on unexpected data.
    let mode = RelatedMode::parse(&page.page.related_mode).unwrap_or_default();

    let manual = page
        .translation_for(&params.locale)
        .map(|t| t.related_overrides())
        .unwrap_or_default();

    let entries = if mode == RelatedMode::Manual {
        // No pool access needed: manual mode is fully deterministic.
        resolve_related(
            &page.page.path(),
            &manual,
            mode,
            page.page.related_count,
            &[],
            &mut rand::rng(),
        )
    } else {
        let pool = build_candidate_pool(&state, &params.locale).await?;
        resolve_related(
            &page.page.path(),
            &manual,
            mode,
            page.page.related_count,
            &pool,
            &mut rand::rng(),
        )
    };

    Ok(Json(DataResponse { data: entries }))
}
