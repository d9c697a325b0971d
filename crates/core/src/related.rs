//! Related-calculator candidate pool and resolver.
//!
//! The candidate pool is the union of the static registry and every
//! published admin page, de-duplicated by path. The resolver picks the
//! subset to show on one page render according to the page's configured
//! mode. No database access — pure domain logic.

use std::collections::HashSet;

use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Count bounds
// ---------------------------------------------------------------------------

/// Smallest allowed related-calculator count.
pub const MIN_RELATED_COUNT: i32 = 1;

/// Largest allowed related-calculator count.
pub const MAX_RELATED_COUNT: i32 = 12;

/// Count used when a page does not specify one.
pub const DEFAULT_RELATED_COUNT: i32 = 6;

/// Validate that `count` is within the accepted range.
pub fn validate_related_count(count: i32) -> Result<(), CoreError> {
    if !(MIN_RELATED_COUNT..=MAX_RELATED_COUNT).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Related calculator count must be between {MIN_RELATED_COUNT} and {MAX_RELATED_COUNT}, got {count}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

pub const MODE_MANUAL: &str = "manual";
pub const MODE_RANDOM: &str = "random";
pub const MODE_BOTH: &str = "both";
pub const VALID_RELATED_MODES: &[&str] = &[MODE_MANUAL, MODE_RANDOM, MODE_BOTH];

/// How the final suggestion list is assembled.
///
/// - `Manual`: the curated list, verbatim.
/// - `Random`: a fresh random sample from the candidate pool.
/// - `Both`: the curated list topped up with a random sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelatedMode {
    #[default]
    Manual,
    Random,
    Both,
}

impl RelatedMode {
    /// Parse a persisted mode string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            MODE_MANUAL => Ok(Self::Manual),
            MODE_RANDOM => Ok(Self::Random),
            MODE_BOTH => Ok(Self::Both),
            other => Err(CoreError::Validation(format!(
                "Invalid related mode '{other}'. Must be one of: {}",
                VALID_RELATED_MODES.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => MODE_MANUAL,
            Self::Random => MODE_RANDOM,
            Self::Both => MODE_BOTH,
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Denormalized display entry for one suggested calculator.
///
/// Produced by resolving either a static calculator against a message
/// bundle or a published page against its translations. Also the shape of
/// the curated overrides persisted on a translation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCalculatorEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub path: String,
}

/// Merge two entry sets keyed by path, `overrides` winning on collision.
///
/// Page-sourced entries are passed as `overrides` so they replace static
/// entries sharing a path. The result keeps `base` insertion order, with
/// override-only entries appended in their own order; within one merge
/// result paths are unique.
pub fn merge_with_precedence(
    base: impl IntoIterator<Item = RelatedCalculatorEntry>,
    overrides: impl IntoIterator<Item = RelatedCalculatorEntry>,
) -> Vec<RelatedCalculatorEntry> {
    let mut merged: IndexMap<String, RelatedCalculatorEntry> = IndexMap::new();
    for entry in base.into_iter().chain(overrides) {
        merged.insert(entry.path.clone(), entry);
    }
    merged.into_values().collect()
}

// ---------------------------------------------------------------------------
// Shuffle
// ---------------------------------------------------------------------------

/// Uniform in-place Fisher–Yates shuffle.
///
/// Swaps from the end with an inclusive random index each step. Used
/// instead of a sort-by-random-key so every permutation is equally likely.
pub fn fisher_yates_shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolve the related-calculator list for one page render.
///
/// `own_path` is the current page's `{category}/{slug}` and never appears
/// in a random fill. `manual` is the curated list parsed from the page's
/// translation row; entries with an empty path or title are dropped.
/// `pool` is the merged candidate pool from [`merge_with_precedence`].
///
/// `max_count` is bounded 1–12 upstream but handled defensively here:
/// non-positive values yield an empty list for every mode. A pool smaller
/// than the requested fill returns as many entries as are available.
pub fn resolve_related<R: Rng + ?Sized>(
    own_path: &str,
    manual: &[RelatedCalculatorEntry],
    mode: RelatedMode,
    max_count: i32,
    pool: &[RelatedCalculatorEntry],
    rng: &mut R,
) -> Vec<RelatedCalculatorEntry> {
    if max_count <= 0 {
        return Vec::new();
    }
    let max = max_count as usize;

    let manual_kept: Vec<RelatedCalculatorEntry> = manual
        .iter()
        .filter(|e| !e.path.is_empty() && !e.title.is_empty())
        .take(max)
        .cloned()
        .collect();

    match mode {
        RelatedMode::Manual => manual_kept,
        RelatedMode::Random => {
            let mut candidates: Vec<RelatedCalculatorEntry> = pool
                .iter()
                .filter(|e| e.path != own_path)
                .cloned()
                .collect();
            fisher_yates_shuffle(&mut candidates, rng);
            candidates.truncate(max);
            candidates
        }
        RelatedMode::Both => {
            // Every manual path is excluded from the random fill, including
            // entries past the truncation point that will never be shown.
            let manual_paths: HashSet<&str> = manual.iter().map(|e| e.path.as_str()).collect();
            let mut candidates: Vec<RelatedCalculatorEntry> = pool
                .iter()
                .filter(|e| e.path != own_path && !manual_paths.contains(e.path.as_str()))
                .cloned()
                .collect();
            fisher_yates_shuffle(&mut candidates, rng);

            let fill = max.saturating_sub(manual_kept.len());
            let mut result = manual_kept;
            result.extend(candidates.into_iter().take(fill));
            result
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
