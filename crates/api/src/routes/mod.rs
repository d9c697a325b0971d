pub mod health;
pub mod pages;
pub mod related;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pages                              list, create
/// /pages/bulk-delete                  bulk delete by id list (POST)
/// /pages/bulk-publish                 bulk set publish flag (POST)
/// /pages/bulk-import                  import rows, skip existing (POST)
/// /pages/clean-translations           drop non-English translations (POST)
/// /pages/by-path/{category}/{slug}    get by natural key
/// /pages/{id}                         get, update, delete
/// /pages/{id}/translate               run a translation job (POST)
///
/// /related/{category}/{slug}          resolve related calculators (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pages", pages::router())
        .nest("/related", related::router())
}
