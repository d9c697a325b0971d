//! Validation rules for admin-authored page fields.
//!
//! Slugs and categories become URL segments, so they are restricted to
//! lowercase alphanumerics and single hyphens. Locale codes are checked
//! before they are used to build a message-bundle filename.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// URL-segment shape shared by slugs and categories.
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"));

/// BCP-47-lite locale shape: `en`, `de`, `pt-BR`.
static LOCALE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z]{2}(-[A-Z]{2})?$").expect("valid regex"));

/// Validate a page slug (non-empty, lowercase alphanumerics and hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".to_string()));
    }
    if !SEGMENT_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits, and hyphens"
        )));
    }
    Ok(())
}

/// Validate a page category (same shape as a slug).
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if category.is_empty() {
        return Err(CoreError::Validation(
            "Category must not be empty".to_string(),
        ));
    }
    if !SEGMENT_RE.is_match(category) {
        return Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Use lowercase letters, digits, and hyphens"
        )));
    }
    Ok(())
}

/// Check whether `locale` has a plausible locale-code shape.
pub fn is_valid_locale(locale: &str) -> bool {
    LOCALE_RE.is_match(locale)
}

/// Validate a locale code for a translation row.
pub fn validate_locale(locale: &str) -> Result<(), CoreError> {
    if is_valid_locale(locale) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid locale '{locale}'. Expected a code like 'en' or 'pt-BR'"
        )))
    }
}
