//! Integration tests for page CRUD and bulk operations.
//!
//! Exercises the full repository layer against a real database:
//! - Create with translation set, unique constraint violations
//! - Wholesale translation replacement on update
//! - Cascade delete behaviour
//! - Bulk delete/publish/import and translation cleanup

use sqlx::PgPool;

use calcsite_db::models::page::{BulkImportRow, CreatePage, TranslationInput, UpdatePage};
use calcsite_db::repositories::page_repo::PageFilter;
use calcsite_db::repositories::PageRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_translation(locale: &str, title: &str) -> TranslationInput {
    TranslationInput {
        locale: locale.to_string(),
        title: title.to_string(),
        display_title: None,
        description: None,
        body: None,
        faq_items: None,
        related_overrides: None,
        label_overrides: None,
    }
}

fn new_page(category: &str, slug: &str, locales: &[(&str, &str)]) -> CreatePage {
    CreatePage {
        category: category.to_string(),
        slug: slug.to_string(),
        published: None,
        related_mode: None,
        related_count: None,
        translations: locales
            .iter()
            .map(|(locale, title)| new_translation(locale, title))
            .collect(),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_page_with_translations(pool: PgPool) {
    let input = new_page("math", "addition", &[("en", "Addition"), ("de", "Addieren")]);
    let page = PageRepo::create(&pool, &input).await.unwrap();

    assert_eq!(page.category, "math");
    assert_eq!(page.slug, "addition");
    assert!(!page.published, "pages start unpublished by default");
    assert_eq!(page.related_mode, "manual");
    assert_eq!(page.related_count, 6);

    let with = PageRepo::find_by_id_with_translations(&pool, page.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with.translations.len(), 2);
    assert_eq!(with.translation_for("de").unwrap().title, "Addieren");
}

#[sqlx::test]
async fn duplicate_category_slug_is_rejected(pool: PgPool) {
    let input = new_page("math", "addition", &[("en", "Addition")]);
    PageRepo::create(&pool, &input).await.unwrap();

    let err = PageRepo::create(&pool, &input).await.unwrap_err();
    assert!(is_unique_violation(&err), "expected 23505, got {err:?}");
}

#[sqlx::test]
async fn same_slug_in_different_categories_is_allowed(pool: PgPool) {
    PageRepo::create(&pool, &new_page("math", "power", &[("en", "Power")]))
        .await
        .unwrap();
    PageRepo::create(&pool, &new_page("electric", "power", &[("en", "Power")]))
        .await
        .unwrap();

    let found = PageRepo::find_by_category_slug(&pool, "electric", "power")
        .await
        .unwrap();
    assert!(found.is_some());
}

#[sqlx::test]
async fn duplicate_locale_per_page_is_rejected(pool: PgPool) {
    let input = new_page("math", "addition", &[("en", "A"), ("en", "B")]);
    let err = PageRepo::create(&pool, &input).await.unwrap_err();
    assert!(is_unique_violation(&err), "expected 23505, got {err:?}");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn update_replaces_translation_set(pool: PgPool) {
    let input = new_page("math", "addition", &[("en", "Addition"), ("de", "Addieren")]);
    let page = PageRepo::create(&pool, &input).await.unwrap();

    let update = UpdatePage {
        published: Some(true),
        related_mode: Some("both".to_string()),
        related_count: Some(4),
        translations: Some(vec![new_translation("en", "Addition v2")]),
    };
    let updated = PageRepo::update(&pool, page.id, &update).await.unwrap().unwrap();
    assert!(updated.published);
    assert_eq!(updated.related_mode, "both");
    assert_eq!(updated.related_count, 4);

    // The old de row is gone; the set was replaced, not merged.
    let translations = PageRepo::get_translations(&pool, page.id).await.unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].title, "Addition v2");
}

#[sqlx::test]
async fn update_without_translations_keeps_existing_set(pool: PgPool) {
    let input = new_page("math", "addition", &[("en", "Addition"), ("de", "Addieren")]);
    let page = PageRepo::create(&pool, &input).await.unwrap();

    let update = UpdatePage {
        published: Some(true),
        related_mode: None,
        related_count: None,
        translations: None,
    };
    PageRepo::update(&pool, page.id, &update).await.unwrap().unwrap();

    let translations = PageRepo::get_translations(&pool, page.id).await.unwrap();
    assert_eq!(translations.len(), 2);
}

#[sqlx::test]
async fn update_missing_page_returns_none(pool: PgPool) {
    let update = UpdatePage {
        published: Some(true),
        related_mode: None,
        related_count: None,
        translations: None,
    };
    let updated = PageRepo::update(&pool, 9999, &update).await.unwrap();
    assert!(updated.is_none());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn delete_cascades_to_translations(pool: PgPool) {
    let input = new_page("math", "addition", &[("en", "Addition")]);
    let page = PageRepo::create(&pool, &input).await.unwrap();

    assert!(PageRepo::delete(&pool, page.id).await.unwrap());

    let translations = PageRepo::get_translations(&pool, page.id).await.unwrap();
    assert!(translations.is_empty());
    assert!(!PageRepo::delete(&pool, page.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn list_filters_by_category_and_published(pool: PgPool) {
    let mut math = new_page("math", "addition", &[("en", "Addition")]);
    math.published = Some(true);
    PageRepo::create(&pool, &math).await.unwrap();
    PageRepo::create(&pool, &new_page("math", "average", &[("en", "Average")]))
        .await
        .unwrap();
    let mut electric = new_page("electric", "power", &[("en", "Power")]);
    electric.published = Some(true);
    PageRepo::create(&pool, &electric).await.unwrap();

    let all = PageRepo::list(&pool, &PageFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let math_only = PageRepo::list(
        &pool,
        &PageFilter {
            category: Some("math".to_string()),
            published: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(math_only.len(), 2);

    let published = PageRepo::list_published_with_translations(&pool).await.unwrap();
    assert_eq!(published.len(), 2);
    assert!(published.iter().all(|p| p.page.published));
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn bulk_publish_and_delete(pool: PgPool) {
    let a = PageRepo::create(&pool, &new_page("math", "a", &[("en", "A")]))
        .await
        .unwrap();
    let b = PageRepo::create(&pool, &new_page("math", "b", &[("en", "B")]))
        .await
        .unwrap();

    let published = PageRepo::bulk_publish(&pool, &[a.id, b.id], true).await.unwrap();
    assert_eq!(published, 2);
    assert!(PageRepo::find_by_id(&pool, a.id).await.unwrap().unwrap().published);

    let deleted = PageRepo::bulk_delete(&pool, &[a.id, b.id, 9999]).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(PageRepo::find_by_id(&pool, a.id).await.unwrap().is_none());
}

#[sqlx::test]
async fn bulk_import_skips_existing_pairs(pool: PgPool) {
    PageRepo::create(&pool, &new_page("math", "addition", &[("en", "Addition")]))
        .await
        .unwrap();

    let rows = vec![
        BulkImportRow {
            category: "math".to_string(),
            slug: "addition".to_string(),
            title: Some("Addition".to_string()),
            display_title: None,
            description: None,
        },
        BulkImportRow {
            category: "math".to_string(),
            slug: "quadratic".to_string(),
            title: None,
            display_title: None,
            description: Some("Solve quadratics".to_string()),
        },
    ];
    let outcome = PageRepo::bulk_import(&pool, &rows).await.unwrap();
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.skipped, 1);

    // Imported page got an English translation titled after its slug.
    let imported = PageRepo::find_by_category_slug_with_translations(&pool, "math", "quadratic")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(imported.translations.len(), 1);
    assert_eq!(imported.translations[0].locale, "en");
    assert_eq!(imported.translations[0].title, "quadratic");
}

#[sqlx::test]
async fn clean_translations_keeps_english(pool: PgPool) {
    let input = new_page(
        "math",
        "addition",
        &[("en", "Addition"), ("de", "Addieren"), ("fr", "Additionner")],
    );
    let page = PageRepo::create(&pool, &input).await.unwrap();

    let removed = PageRepo::clean_translations(&pool, &[page.id]).await.unwrap();
    assert_eq!(removed, 2);

    let translations = PageRepo::get_translations(&pool, page.id).await.unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].locale, "en");
}

// ---------------------------------------------------------------------------
// Translation upsert
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn upsert_translation_replaces_whole_row(pool: PgPool) {
    let input = new_page("math", "addition", &[("en", "Addition"), ("de", "Addieren")]);
    let page = PageRepo::create(&pool, &input).await.unwrap();

    let mut replacement = new_translation("de", "Addieren v2");
    replacement.description = Some("Zahlen addieren".to_string());
    let row = PageRepo::upsert_translation(&pool, page.id, &replacement)
        .await
        .unwrap();
    assert_eq!(row.title, "Addieren v2");

    let translations = PageRepo::get_translations(&pool, page.id).await.unwrap();
    assert_eq!(translations.len(), 2, "en row untouched, de row replaced");
    let de = translations.iter().find(|t| t.locale == "de").unwrap();
    assert_eq!(de.description.as_deref(), Some("Zahlen addieren"));
}
