//! Shared query parameter types for API handlers.

use serde::Deserialize;

use calcsite_core::locale::DEFAULT_LOCALE;

/// Query parameters for endpoints that resolve localized content
/// (`?locale=de`). Defaults to English.
#[derive(Debug, Deserialize)]
pub struct LocaleParams {
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Query parameters for the page list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListPagesParams {
    pub category: Option<String>,
    pub published: Option<bool>,
}
