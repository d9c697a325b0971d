//! Route definitions for admin page management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{pages, translate};
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// POST   /bulk-delete             -> bulk_delete
/// POST   /bulk-publish            -> bulk_publish
/// POST   /bulk-import             -> bulk_import
/// POST   /clean-translations      -> clean_translations
/// GET    /by-path/{category}/{slug} -> get_by_category_slug
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> remove
/// POST   /{id}/translate          -> translate_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list).post(pages::create))
        .route("/bulk-delete", post(pages::bulk_delete))
        .route("/bulk-publish", post(pages::bulk_publish))
        .route("/bulk-import", post(pages::bulk_import))
        .route("/clean-translations", post(pages::clean_translations))
        .route("/by-path/{category}/{slug}", get(pages::get_by_category_slug))
        .route(
            "/{id}",
            get(pages::get_by_id).put(pages::update).delete(pages::remove),
        )
        .route("/{id}/translate", post(translate::translate_page))
}
