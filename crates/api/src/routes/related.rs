//! Route definitions for related-calculator resolution.

use axum::routing::get;
use axum::Router;

use crate::handlers::related;
use crate::state::AppState;

/// Routes mounted at `/related`.
///
/// ```text
/// GET /{category}/{slug}?locale=  -> for_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{category}/{slug}", get(related::for_page))
}
