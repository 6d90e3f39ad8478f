//! Deterministic ranking of aggregated statistics.
//!
//! Ordering rule, applied identically at the top level and inside every
//! nested frequency map: occurrence count descending, ties broken by
//! ascending (lexicographic) name. The rule is deliberate and pinned by
//! tests at both levels; earlier tooling in this space accidentally flipped
//! the name direction between the two levels.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{EntityStats, UsageTable};

/// Order entities by count descending, name ascending.
pub fn rank(table: &UsageTable) -> Vec<(&str, &EntityStats)> {
    let mut ranked: Vec<(&str, &EntityStats)> = table
        .iter()
        .map(|(name, stats)| (name.as_str(), stats))
        .collect();
    ranked.sort_by(|a, b| compare_counted(a.0, a.1.count, b.0, b.1.count));
    ranked
}

/// Order a frequency map by count descending, name ascending.
pub fn rank_frequency_map(map: &HashMap<String, u32>) -> Vec<(&str, u32)> {
    let mut ranked: Vec<(&str, u32)> = map
        .iter()
        .map(|(name, &count)| (name.as_str(), count))
        .collect();
    ranked.sort_by(|a, b| compare_counted(a.0, a.1, b.0, b.1));
    ranked
}

fn compare_counted(name_a: &str, count_a: u32, name_b: &str, count_b: u32) -> Ordering {
    count_b.cmp(&count_a).then_with(|| name_a.cmp(name_b))
}

/// Usage percentage rounded to two decimals.
///
/// The denominator is always the owning entity's `count`; a ranked entity
/// has `count >= 1` by construction, so a zero denominator is an internal
/// invariant violation rather than a user-facing error.
pub fn percentage(occurrences: u32, denominator: u32) -> f64 {
    debug_assert!(denominator > 0, "percentage denominator must be positive");
    (100.0 * occurrences as f64 / denominator as f64 * 100.0).round() / 100.0
}
