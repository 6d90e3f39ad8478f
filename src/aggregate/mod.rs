//! Usage aggregation.
//!
//! Walks a competitor list in standings order and accumulates, per entity
//! name, how often the entity appeared and under which configuration
//! (item, ability, type, moves), which teammates it appeared next to, and
//! the final placing of everyone who brought it.
//!
//! `aggregate` is a pure function: every call builds and returns its own
//! table, so the full-field and top-cut aggregations never share state.

use tracing::debug;

use crate::models::{Competitor, UsageTable};

/// Aggregate usage statistics over a competitor subset.
///
/// Competitors are processed strictly in input order; the 1-based input
/// position of each competitor is what lands in each entity's `placings`
/// sequence. Rosters are assumed to be fully resolved upstream, so this
/// function cannot fail.
pub fn aggregate(competitors: &[Competitor]) -> UsageTable {
    let mut table = UsageTable::new();

    for (index, competitor) in competitors.iter().enumerate() {
        let position = index as u32 + 1;

        for entry in &competitor.roster.entries {
            let stats = table.entry(entry.name.clone()).or_default();

            stats.count += 1;
            *stats.item_usage.entry(entry.item.clone()).or_insert(0) += 1;
            *stats
                .ability_usage
                .entry(entry.ability.clone())
                .or_insert(0) += 1;
            *stats
                .type_usage
                .entry(entry.type_or_default().to_string())
                .or_insert(0) += 1;

            // Duplicate moves within one entry are counted each time they
            // occur in the source document.
            for mv in &entry.moves {
                *stats.move_usage.entry(mv.clone()).or_insert(0) += 1;
            }

            for teammate in &competitor.roster.entries {
                if teammate.name != entry.name {
                    *stats
                        .teammate_usage
                        .entry(teammate.name.clone())
                        .or_insert(0) += 1;
                }
            }

            stats.placings.push(position);
        }
    }

    debug!(
        competitors = competitors.len(),
        entities = table.len(),
        "aggregated usage table"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Roster, RosterEntry, DEFAULT_TYPE};
    use pretty_assertions::assert_eq;

    fn entry(name: &str, item: &str) -> RosterEntry {
        RosterEntry::new(name, item, "Static")
    }

    fn competitor(placing: u32, entries: Vec<RosterEntry>) -> Competitor {
        Competitor::new(placing, format!("Player {placing}"), 0, Roster::new(entries))
    }

    #[test]
    fn test_count_matches_distinct_competitors() {
        let competitors = vec![
            competitor(1, vec![entry("Foo", "Rod")]),
            competitor(2, vec![entry("Foo", "Rod")]),
            competitor(3, vec![entry("Bar", "Orb")]),
        ];

        let table = aggregate(&competitors);

        assert_eq!(table["Foo"].count, 2);
        assert_eq!(table["Bar"].count, 1);
        assert_eq!(table["Foo"].item_usage.get("Rod"), Some(&2));
    }

    #[test]
    fn test_item_ability_type_sums_equal_count() {
        let competitors = vec![
            competitor(
                1,
                vec![entry("Foo", "Rod").with_type("Water")],
            ),
            competitor(
                2,
                vec![entry("Foo", "Scarf").with_type("Fire")],
            ),
            competitor(3, vec![entry("Foo", "Rod")]),
        ];

        let table = aggregate(&competitors);
        let stats = &table["Foo"];

        assert_eq!(stats.item_usage.values().sum::<u32>(), stats.count);
        assert_eq!(stats.ability_usage.values().sum::<u32>(), stats.count);
        assert_eq!(stats.type_usage.values().sum::<u32>(), stats.count);
    }

    #[test]
    fn test_absent_type_uses_default_token() {
        let competitors = vec![competitor(1, vec![entry("Foo", "Rod")])];

        let table = aggregate(&competitors);
        assert_eq!(table["Foo"].type_usage.get(DEFAULT_TYPE), Some(&1));
    }

    #[test]
    fn test_moves_counted_per_appearance_without_dedup() {
        let competitors = vec![
            competitor(
                1,
                vec![entry("Foo", "Rod")
                    .with_moves(vec!["Surf".into(), "Protect".into(), "Surf".into()])],
            ),
            competitor(
                2,
                vec![entry("Foo", "Rod").with_moves(vec!["Surf".into()])],
            ),
        ];

        let table = aggregate(&competitors);
        let stats = &table["Foo"];

        // Duplicate "Surf" on competitor 1 increments twice.
        assert_eq!(stats.move_usage.get("Surf"), Some(&3));
        assert_eq!(stats.move_usage.get("Protect"), Some(&1));
        // Move totals exceed count, unlike item/ability/type.
        assert!(stats.move_usage.values().sum::<u32>() > stats.count);
    }

    #[test]
    fn test_teammate_usage_is_symmetric() {
        let competitors = vec![
            competitor(1, vec![entry("Foo", "Rod"), entry("Bar", "Orb")]),
            competitor(2, vec![entry("Foo", "Rod"), entry("Baz", "Herb")]),
            competitor(3, vec![entry("Bar", "Orb"), entry("Baz", "Herb")]),
        ];

        let table = aggregate(&competitors);

        for (name_a, stats_a) in &table {
            for (name_b, stats_b) in &table {
                let a_to_b = stats_a.teammate_usage.get(name_b).copied().unwrap_or(0);
                let b_to_a = stats_b.teammate_usage.get(name_a).copied().unwrap_or(0);
                assert_eq!(a_to_b, b_to_a, "asymmetry between {name_a} and {name_b}");
            }
        }

        assert_eq!(table["Foo"].teammate_usage.get("Bar"), Some(&1));
        assert_eq!(table["Foo"].teammate_usage.get("Baz"), Some(&1));
        assert_eq!(table["Foo"].teammate_usage.get("Foo"), None);
    }

    #[test]
    fn test_placings_record_processing_order_not_standings_placing() {
        // Positions are 1-based indexes into the input slice, so a top-cut
        // subset re-numbers from 1 regardless of original placings.
        let competitors = vec![
            competitor(4, vec![entry("Foo", "Rod")]),
            competitor(9, vec![entry("Foo", "Rod")]),
        ];

        let table = aggregate(&competitors);
        assert_eq!(table["Foo"].placings, vec![1, 2]);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let competitors = vec![
            competitor(1, vec![entry("Foo", "Rod"), entry("Bar", "Orb")]),
            competitor(2, vec![entry("Baz", "Herb")]),
        ];

        let first = aggregate(&competitors);
        let second = aggregate(&competitors);

        let first_keys: Vec<_> = first.keys().collect();
        let second_keys: Vec<_> = second.keys().collect();
        assert_eq!(first_keys, second_keys);
        assert_eq!(first["Foo"].count, second["Foo"].count);
    }

    #[test]
    fn test_table_keys_follow_first_appearance_order() {
        let competitors = vec![
            competitor(1, vec![entry("Zebra", "Rod"), entry("Aardvark", "Orb")]),
            competitor(2, vec![entry("Mole", "Herb")]),
        ];

        let table = aggregate(&competitors);
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Zebra", "Aardvark", "Mole"]);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let table = aggregate(&[]);
        assert!(table.is_empty());
    }
}
