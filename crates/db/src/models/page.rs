//! Page entity models and DTOs.
//!
//! A page is one content unit of the calculator site, identified by its
//! (category, slug) pair and owning one translation row per locale. The
//! translation set is always replaced wholesale on save, never patched
//! field by field.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use calcsite_core::content::{decode_blob, FaqItem, LabelOverrides};
use calcsite_core::locale::pick_locale;
use calcsite_core::related::RelatedCalculatorEntry;
use calcsite_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub category: String,
    pub slug: String,
    pub published: bool,
    pub related_mode: String,
    pub related_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Page {
    /// URL path of the page, `{category}/{slug}`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.category, self.slug)
    }
}

/// A row from the `page_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageTranslation {
    pub id: DbId,
    pub page_id: DbId,
    pub locale: String,
    pub title: String,
    pub display_title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub faq_items: Option<serde_json::Value>,
    pub related_overrides: Option<serde_json::Value>,
    pub label_overrides: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PageTranslation {
    /// Title shown on cards and in navigation; the dedicated display title
    /// falls back to `title` when blank.
    pub fn display_title(&self) -> &str {
        match self.display_title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.title,
        }
    }

    /// Decoded FAQ items; a missing or malformed blob is an empty list.
    pub fn faq(&self) -> Vec<FaqItem> {
        decode_blob(self.faq_items.as_ref()).unwrap_or_default()
    }

    /// Decoded curated related-calculator list; missing or malformed is empty.
    pub fn related_overrides(&self) -> Vec<RelatedCalculatorEntry> {
        decode_blob(self.related_overrides.as_ref()).unwrap_or_default()
    }

    /// Decoded UI label overrides; missing or malformed is empty.
    pub fn labels(&self) -> LabelOverrides {
        decode_blob(self.label_overrides.as_ref()).unwrap_or_default()
    }
}

/// A page enriched with its full translation set.
#[derive(Debug, Clone, Serialize)]
pub struct PageWithTranslations {
    #[serde(flatten)]
    pub page: Page,
    pub translations: Vec<PageTranslation>,
}

impl PageWithTranslations {
    /// Best translation for `locale`: exact match, then English, then the
    /// first row in collection order.
    pub fn translation_for(&self, locale: &str) -> Option<&PageTranslation> {
        pick_locale(&self.translations, locale, |t| &t.locale)
    }

    /// Candidate-pool entry for this page, resolved for `locale`.
    ///
    /// Title defaults to the slug and description to the empty string when
    /// no usable translation exists.
    pub fn related_entry(&self, locale: &str) -> RelatedCalculatorEntry {
        let picked = self.translation_for(locale);
        let title = picked
            .map(|t| t.display_title())
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.page.slug);
        RelatedCalculatorEntry {
            title: title.to_string(),
            description: picked
                .and_then(|t| t.description.clone())
                .unwrap_or_default(),
            path: self.page.path(),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// One translation in a create/update payload. The repository serializes
/// the optional blobs to JSONB columns.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationInput {
    pub locale: String,
    pub title: String,
    pub display_title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub faq_items: Option<Vec<FaqItem>>,
    pub related_overrides: Option<Vec<RelatedCalculatorEntry>>,
    pub label_overrides: Option<LabelOverrides>,
}

impl TranslationInput {
    pub fn faq_items_json(&self) -> Option<serde_json::Value> {
        self.faq_items
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok())
    }

    pub fn related_overrides_json(&self) -> Option<serde_json::Value> {
        self.related_overrides
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok())
    }

    pub fn label_overrides_json(&self) -> Option<serde_json::Value> {
        self.label_overrides
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok())
    }
}

/// DTO for creating a new page. Pages start unpublished unless stated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub category: String,
    pub slug: String,
    pub published: Option<bool>,
    pub related_mode: Option<String>,
    pub related_count: Option<i32>,
    /// Full translation set; one row per locale.
    #[serde(default)]
    pub translations: Vec<TranslationInput>,
}

/// DTO for updating an existing page. Category and slug are immutable.
///
/// If `translations` is `Some`, the whole translation set is replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePage {
    pub published: Option<bool>,
    pub related_mode: Option<String>,
    pub related_count: Option<i32>,
    pub translations: Option<Vec<TranslationInput>>,
}

/// One row of a bulk import. Existing (category, slug) pairs are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkImportRow {
    pub category: String,
    pub slug: String,
    pub title: Option<String>,
    pub display_title: Option<String>,
    pub description: Option<String>,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Serialize)]
pub struct BulkImportOutcome {
    pub created: u64,
    pub skipped: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
