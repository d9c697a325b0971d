//! HTTP surface for the calcsite backend.
//!
//! Admin CRUD over pages, the related-calculator resolution endpoint, and
//! the translation-job endpoint, mounted under `/api/v1` with the health
//! check at root level.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod translate;
