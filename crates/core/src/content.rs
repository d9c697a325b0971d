//! Typed schemas for the optional JSON blobs persisted on translations.
//!
//! FAQ items, related-calculator overrides, and UI label overrides are
//! stored as JSONB columns. They are optional enrichments: a blob that
//! fails to decode is treated as absent, never as an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One question/answer pair shown in a page's FAQ section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// UI label overrides keyed by label id.
pub type LabelOverrides = BTreeMap<String, String>;

/// Decode an optional JSON blob, mapping parse failure to absence.
pub fn decode_blob<T: serde::de::DeserializeOwned>(value: Option<&serde_json::Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}
