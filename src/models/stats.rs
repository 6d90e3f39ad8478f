//! Aggregated usage statistics models.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accumulated usage statistics for one entity across a competitor subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStats {
    /// Number of competitors whose roster contained this entity
    pub count: u32,

    /// Equipped item -> occurrence count (sums to `count`)
    pub item_usage: HashMap<String, u32>,

    /// Ability -> occurrence count (sums to `count`)
    pub ability_usage: HashMap<String, u32>,

    /// Elemental type -> occurrence count (sums to `count`)
    pub type_usage: HashMap<String, u32>,

    /// Move -> occurrence count (does NOT sum to `count`; one entry carries
    /// several moves, each counted once per appearance)
    pub move_usage: HashMap<String, u32>,

    /// Other entity name -> number of rosters containing both
    pub teammate_usage: HashMap<String, u32>,

    /// 1-based final placing of every user, in processing order
    pub placings: Vec<u32>,
}

/// Usage table for one competitor subset, keyed by entity name.
///
/// Insertion order is first-appearance order across the processed standings.
pub type UsageTable = IndexMap<String, EntityStats>;

/// Tournament identity metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentMeta {
    /// Tournament name, used to derive artifact file names
    pub name: String,

    /// Event date, if known
    pub date: Option<NaiveDate>,
}

impl TournamentMeta {
    /// Create new metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: None,
        }
    }

    /// Builder method to set the event date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// The full result of one tournament aggregation run.
///
/// Pairs the full-field table with the top-cut table. The two tables are
/// built by independent aggregation calls and never share records.
#[derive(Debug, Clone)]
pub struct UsageSummary {
    /// Tournament identity
    pub tournament: TournamentMeta,

    /// Usage across every entrant
    pub field: UsageTable,

    /// Number of entrants
    pub field_size: usize,

    /// Usage across the playoff cut
    pub top_cut: UsageTable,

    /// Number of competitors in the cut
    pub top_cut_size: usize,
}

impl UsageSummary {
    /// Create a new summary.
    pub fn new(
        tournament: TournamentMeta,
        field: UsageTable,
        field_size: usize,
        top_cut: UsageTable,
        top_cut_size: usize,
    ) -> Self {
        Self {
            tournament,
            field,
            field_size,
            top_cut,
            top_cut_size,
        }
    }
}

/// A single scatter-plot point: usage rates for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct UsagePoint {
    /// Entity name, used as the point label
    pub name: String,

    /// Fraction of the full field using this entity (0.0 to 1.0)
    pub total_rate: f64,

    /// Fraction of the top cut using this entity (0.0 to 1.0)
    pub top_cut_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_stats_default_is_empty() {
        let stats = EntityStats::default();
        assert_eq!(stats.count, 0);
        assert!(stats.item_usage.is_empty());
        assert!(stats.ability_usage.is_empty());
        assert!(stats.type_usage.is_empty());
        assert!(stats.move_usage.is_empty());
        assert!(stats.teammate_usage.is_empty());
        assert!(stats.placings.is_empty());
    }

    #[test]
    fn test_tournament_meta_builder() {
        let meta = TournamentMeta::new("Regional Liverpool")
            .with_date(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(meta.name, "Regional Liverpool");
        assert!(meta.date.is_some());
    }

    #[test]
    fn test_usage_table_preserves_insertion_order() {
        let mut table = UsageTable::new();
        table.insert("Zebra".to_string(), EntityStats::default());
        table.insert("Aardvark".to_string(), EntityStats::default());

        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["Zebra", "Aardvark"]);
    }

    #[test]
    fn test_entity_stats_serialization() {
        let mut stats = EntityStats::default();
        stats.count = 2;
        stats.item_usage.insert("Rod".to_string(), 2);
        stats.placings.extend([1, 5]);

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: EntityStats = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.count, 2);
        assert_eq!(deserialized.item_usage.get("Rod"), Some(&2));
        assert_eq!(deserialized.placings, vec![1, 5]);
    }
}
