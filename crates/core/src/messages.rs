//! Locale message bundles.
//!
//! Bundles are nested JSON objects (`{"addition": {"title": "..."}}`)
//! loaded from a directory of `<locale>.json` files. Lookup uses dot paths
//! and fails soft: any missing segment, non-object traversal, or
//! non-string leaf yields the empty string.

use std::path::PathBuf;

use serde_json::Value;

use crate::locale::DEFAULT_LOCALE;
use crate::rules::is_valid_locale;

/// A parsed message bundle for one locale.
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    root: Value,
}

impl MessageBundle {
    /// Bundle with no messages; every lookup yields `""`.
    pub fn empty() -> Self {
        Self { root: Value::Null }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Resolve a dot path (`"addition.title"`) against the nested bundle.
    pub fn lookup(&self, path: &str) -> String {
        let mut current = &self.root;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => return String::new(),
            }
        }
        current.as_str().unwrap_or_default().to_string()
    }
}

/// Loads message bundles from a directory of `<locale>.json` files.
///
/// Injected into the candidate pool builder instead of living behind a
/// module-level import, so the fallback chain (requested locale, then
/// English, then empty) is an explicit, testable branch.
#[derive(Debug, Clone)]
pub struct MessageStore {
    dir: PathBuf,
}

impl MessageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the bundle for `locale`.
    ///
    /// Never fails: a missing or unparseable file falls back to the English
    /// bundle, and a missing English bundle degrades to an empty one, which
    /// in turn degrades calculator titles to their raw ids.
    pub fn load(&self, locale: &str) -> MessageBundle {
        if let Some(bundle) = self.read_bundle(locale) {
            return bundle;
        }
        if locale != DEFAULT_LOCALE {
            if let Some(bundle) = self.read_bundle(DEFAULT_LOCALE) {
                return bundle;
            }
        }
        MessageBundle::empty()
    }

    fn read_bundle(&self, locale: &str) -> Option<MessageBundle> {
        // Locale codes become filenames; reject anything path-like.
        if !is_valid_locale(locale) {
            return None;
        }
        let path = self.dir.join(format!("{locale}.json"));
        let raw = std::fs::read_to_string(path).ok()?;
        let root: Value = serde_json::from_str(&raw).ok()?;
        Some(MessageBundle::from_value(root))
    }
}
