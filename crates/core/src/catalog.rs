//! Compile-time calculator registry.
//!
//! Descriptors for the calculators shipped with the site itself, as opposed
//! to pages authored in the admin panel. Titles and descriptions live in
//! the locale message bundles under `{id}.title` / `{id}.description`.

use crate::messages::MessageBundle;
use crate::related::RelatedCalculatorEntry;

/// A calculator known at compile time. Immutable for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct StaticCalculator {
    /// Stable identifier, also the title fallback when a bundle is broken.
    pub id: &'static str,
    /// Dot path of the localized title in the message bundle.
    pub title_key: &'static str,
    /// Dot path of the localized description in the message bundle.
    pub description_key: &'static str,
    /// URL path, `{category}/{slug}`.
    pub path: &'static str,
    pub category: &'static str,
}

/// Every calculator shipped with the site.
pub const STATIC_CALCULATORS: &[StaticCalculator] = &[
    StaticCalculator {
        id: "addition",
        title_key: "addition.title",
        description_key: "addition.description",
        path: "math/addition",
        category: "math",
    },
    StaticCalculator {
        id: "subtraction",
        title_key: "subtraction.title",
        description_key: "subtraction.description",
        path: "math/subtraction",
        category: "math",
    },
    StaticCalculator {
        id: "multiplication",
        title_key: "multiplication.title",
        description_key: "multiplication.description",
        path: "math/multiplication",
        category: "math",
    },
    StaticCalculator {
        id: "division",
        title_key: "division.title",
        description_key: "division.description",
        path: "math/division",
        category: "math",
    },
    StaticCalculator {
        id: "percentage",
        title_key: "percentage.title",
        description_key: "percentage.description",
        path: "math/percentage",
        category: "math",
    },
    StaticCalculator {
        id: "average",
        title_key: "average.title",
        description_key: "average.description",
        path: "math/average",
        category: "math",
    },
    StaticCalculator {
        id: "ohms-law",
        title_key: "ohms-law.title",
        description_key: "ohms-law.description",
        path: "electric/ohms-law",
        category: "electric",
    },
    StaticCalculator {
        id: "voltage-divider",
        title_key: "voltage-divider.title",
        description_key: "voltage-divider.description",
        path: "electric/voltage-divider",
        category: "electric",
    },
    StaticCalculator {
        id: "power",
        title_key: "power.title",
        description_key: "power.description",
        path: "electric/power",
        category: "electric",
    },
    StaticCalculator {
        id: "length",
        title_key: "length.title",
        description_key: "length.description",
        path: "conversion/length",
        category: "conversion",
    },
    StaticCalculator {
        id: "temperature",
        title_key: "temperature.title",
        description_key: "temperature.description",
        path: "conversion/temperature",
        category: "conversion",
    },
    StaticCalculator {
        id: "weight",
        title_key: "weight.title",
        description_key: "weight.description",
        path: "conversion/weight",
        category: "conversion",
    },
];

/// Resolve the static registry against a message bundle.
///
/// A title whose key is missing from the bundle falls back to the
/// calculator's id, so a broken or partial bundle degrades instead of
/// erroring. Descriptions degrade to the empty string.
pub fn resolve_static_entries(bundle: &MessageBundle) -> Vec<RelatedCalculatorEntry> {
    STATIC_CALCULATORS
        .iter()
        .map(|calc| {
            let title = bundle.lookup(calc.title_key);
            RelatedCalculatorEntry {
                title: if title.is_empty() {
                    calc.id.to_string()
                } else {
                    title
                },
                description: bundle.lookup(calc.description_key),
                path: calc.path.to_string(),
            }
        })
        .collect()
}
