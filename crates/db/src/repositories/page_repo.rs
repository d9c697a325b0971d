//! Repository for the `pages` and `page_translations` tables.
//!
//! Translation sets are replaced wholesale (delete-then-recreate inside the
//! page's transaction); no translation row is ever patched in place.

use sqlx::PgPool;

use calcsite_core::locale::DEFAULT_LOCALE;
use calcsite_core::types::DbId;

use crate::models::page::{
    BulkImportOutcome, BulkImportRow, CreatePage, Page, PageTranslation, PageWithTranslations,
    TranslationInput, UpdatePage,
};

/// Column list for the `pages` table.
const COLUMNS: &str =
    "id, category, slug, published, related_mode, related_count, created_at, updated_at";

/// Column list for the `page_translations` table.
const TRANSLATION_COLUMNS: &str = "id, page_id, locale, title, display_title, description, body, \
    faq_items, related_overrides, label_overrides, created_at, updated_at";

/// Filter for page listings. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    pub category: Option<String>,
    pub published: Option<bool>,
}

/// Provides CRUD and bulk operations for pages and their translations.
pub struct PageRepo;

impl PageRepo {
    /// Insert a new page together with its full translation set.
    pub async fn create(pool: &PgPool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO pages (category, slug, published, related_mode, related_count) \
             VALUES ($1, $2, COALESCE($3, false), COALESCE($4, 'manual'), COALESCE($5, 6)) \
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&insert_query)
            .bind(&input.category)
            .bind(&input.slug)
            .bind(input.published)
            .bind(&input.related_mode)
            .bind(input.related_count)
            .fetch_one(&mut *tx)
            .await?;

        if !input.translations.is_empty() {
            Self::set_translations_inner(&mut tx, page.id, &input.translations).await?;
        }

        tx.commit().await?;
        Ok(page)
    }

    /// Find a page by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by ID, enriched with its translations.
    pub async fn find_by_id_with_translations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PageWithTranslations>, sqlx::Error> {
        let page = Self::find_by_id(pool, id).await?;
        match page {
            Some(page) => {
                let translations = Self::get_translations(pool, page.id).await?;
                Ok(Some(PageWithTranslations { page, translations }))
            }
            None => Ok(None),
        }
    }

    /// Find a page by its natural key (category, slug).
    pub async fn find_by_category_slug(
        pool: &PgPool,
        category: &str,
        slug: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE category = $1 AND slug = $2");
        sqlx::query_as::<_, Page>(&query)
            .bind(category)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by (category, slug), enriched with its translations.
    pub async fn find_by_category_slug_with_translations(
        pool: &PgPool,
        category: &str,
        slug: &str,
    ) -> Result<Option<PageWithTranslations>, sqlx::Error> {
        let page = Self::find_by_category_slug(pool, category, slug).await?;
        match page {
            Some(page) => {
                let translations = Self::get_translations(pool, page.id).await?;
                Ok(Some(PageWithTranslations { page, translations }))
            }
            None => Ok(None),
        }
    }

    /// List pages matching `filter`, ordered by category then slug.
    pub async fn list(pool: &PgPool, filter: &PageFilter) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::boolean IS NULL OR published = $2) \
             ORDER BY category, slug"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&filter.category)
            .bind(filter.published)
            .fetch_all(pool)
            .await
    }

    /// List pages matching `filter` with their translations.
    pub async fn list_with_translations(
        pool: &PgPool,
        filter: &PageFilter,
    ) -> Result<Vec<PageWithTranslations>, sqlx::Error> {
        let pages = Self::list(pool, filter).await?;
        let mut result = Vec::with_capacity(pages.len());

        for page in pages {
            let translations = Self::get_translations(pool, page.id).await?;
            result.push(PageWithTranslations { page, translations });
        }

        Ok(result)
    }

    /// All published pages with their translations (candidate-pool query).
    pub async fn list_published_with_translations(
        pool: &PgPool,
    ) -> Result<Vec<PageWithTranslations>, sqlx::Error> {
        let filter = PageFilter {
            category: None,
            published: Some(true),
        };
        Self::list_with_translations(pool, &filter).await
    }

    /// Update a page. Only non-`None` fields are applied; category and slug
    /// are immutable.
    ///
    /// If `translations` is `Some`, the whole translation set is replaced.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE pages SET \
                published = COALESCE($2, published), \
                related_mode = COALESCE($3, related_mode), \
                related_count = COALESCE($4, related_count), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&update_query)
            .bind(id)
            .bind(input.published)
            .bind(&input.related_mode)
            .bind(input.related_count)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref page) = page {
            if let Some(ref translations) = input.translations {
                Self::set_translations_inner(&mut tx, page.id, translations).await?;
            }
        }

        tx.commit().await?;
        Ok(page)
    }

    /// Delete a page; translations go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Bulk operations
    // -----------------------------------------------------------------------

    /// Delete all pages in `ids`. Returns the number of pages removed.
    pub async fn bulk_delete(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Set the publish flag on all pages in `ids`.
    pub async fn bulk_publish(
        pool: &PgPool,
        ids: &[DbId],
        published: bool,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE pages SET published = $2, updated_at = now() WHERE id = ANY($1)")
                .bind(ids)
                .bind(published)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Import pages in bulk, skipping rows whose (category, slug) pair
    /// already exists. Each created page gets an English translation whose
    /// title defaults to the slug.
    pub async fn bulk_import(
        pool: &PgPool,
        rows: &[BulkImportRow],
    ) -> Result<BulkImportOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut outcome = BulkImportOutcome {
            created: 0,
            skipped: 0,
        };

        for row in rows {
            let inserted: Option<(DbId,)> = sqlx::query_as(
                "INSERT INTO pages (category, slug) VALUES ($1, $2) \
                 ON CONFLICT ON CONSTRAINT uq_pages_category_slug DO NOTHING \
                 RETURNING id",
            )
            .bind(&row.category)
            .bind(&row.slug)
            .fetch_optional(&mut *tx)
            .await?;

            match inserted {
                Some((page_id,)) => {
                    let title = row.title.as_deref().unwrap_or(&row.slug);
                    sqlx::query(
                        "INSERT INTO page_translations \
                            (page_id, locale, title, display_title, description) \
                         VALUES ($1, $2, $3, $4, $5)",
                    )
                    .bind(page_id)
                    .bind(DEFAULT_LOCALE)
                    .bind(title)
                    .bind(&row.display_title)
                    .bind(&row.description)
                    .execute(&mut *tx)
                    .await?;
                    outcome.created += 1;
                }
                None => outcome.skipped += 1,
            }
        }

        tx.commit().await?;
        tracing::info!(
            created = outcome.created,
            skipped = outcome.skipped,
            "Bulk page import finished"
        );
        Ok(outcome)
    }

    /// Delete every non-English translation for the pages in `ids`.
    pub async fn clean_translations(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM page_translations WHERE page_id = ANY($1) AND locale <> $2",
        )
        .bind(ids)
        .bind(DEFAULT_LOCALE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Translation helpers
    // -----------------------------------------------------------------------

    /// Get all translations for a page.
    pub async fn get_translations(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<PageTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM page_translations \
             WHERE page_id = $1 \
             ORDER BY locale"
        );
        sqlx::query_as::<_, PageTranslation>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a single locale's translation row (delete, then insert).
    ///
    /// Used by the translation-job path; the row is replaced whole rather
    /// than patched so partially-applied fields cannot survive.
    pub async fn upsert_translation(
        pool: &PgPool,
        page_id: DbId,
        input: &TranslationInput,
    ) -> Result<PageTranslation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM page_translations WHERE page_id = $1 AND locale = $2")
            .bind(page_id)
            .bind(&input.locale)
            .execute(&mut *tx)
            .await?;

        let translation = Self::insert_translation_inner(&mut tx, page_id, input).await?;

        tx.commit().await?;
        Ok(translation)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace the full translation set within an existing transaction.
    async fn set_translations_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        page_id: DbId,
        translations: &[TranslationInput],
    ) -> Result<(), sqlx::Error> {
        // Delete existing
        sqlx::query("DELETE FROM page_translations WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut **tx)
            .await?;

        // Insert new set
        for translation in translations {
            Self::insert_translation_inner(tx, page_id, translation).await?;
        }

        Ok(())
    }

    /// Insert one translation row within an existing transaction.
    async fn insert_translation_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        page_id: DbId,
        input: &TranslationInput,
    ) -> Result<PageTranslation, sqlx::Error> {
        let insert_query = format!(
            "INSERT INTO page_translations \
                (page_id, locale, title, display_title, description, body, \
                 faq_items, related_overrides, label_overrides) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {TRANSLATION_COLUMNS}"
        );
        sqlx::query_as::<_, PageTranslation>(&insert_query)
            .bind(page_id)
            .bind(&input.locale)
            .bind(&input.title)
            .bind(&input.display_title)
            .bind(&input.description)
            .bind(&input.body)
            .bind(input.faq_items_json())
            .bind(input.related_overrides_json())
            .bind(input.label_overrides_json())
            .fetch_one(&mut **tx)
            .await
    }
}
