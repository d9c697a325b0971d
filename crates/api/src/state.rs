use std::sync::Arc;

use calcsite_core::messages::MessageStore;

use crate::config::ServerConfig;
use crate::translate::TranslationBackend;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: calcsite_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Locale message bundles for static calculator titles.
    pub messages: Arc<MessageStore>,
    /// Chat-completion backend for translation jobs.
    pub translator: Arc<dyn TranslationBackend>,
}
