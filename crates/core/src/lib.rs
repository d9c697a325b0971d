//! Pure domain logic for the calcsite backend.
//!
//! No database access lives here. The crate covers the static calculator
//! registry, locale fallback, message bundles, the related-calculator
//! candidate pool and resolver, and the validation rules shared by the
//! API and repository layers.

pub mod catalog;
pub mod content;
pub mod error;
pub mod locale;
pub mod messages;
pub mod related;
pub mod rules;
pub mod types;
