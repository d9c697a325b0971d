//! Locale fallback resolution.
//!
//! Translation selection, FAQ items, and label overrides all need the same
//! three-tier fallback: exact locale, then English, then the first record
//! in collection order. Centralized here so the call sites cannot diverge.

/// The locale every piece of content is authored in first.
pub const DEFAULT_LOCALE: &str = "en";

/// Pick the best record for `locale` from `records`.
///
/// Fallback order: exact match, then [`DEFAULT_LOCALE`], then the first
/// record in collection order. Returns `None` only for an empty collection.
pub fn pick_locale<'a, T>(
    records: &'a [T],
    locale: &str,
    locale_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    records
        .iter()
        .find(|r| locale_of(r) == locale)
        .or_else(|| records.iter().find(|r| locale_of(r) == DEFAULT_LOCALE))
        .or_else(|| records.first())
}
