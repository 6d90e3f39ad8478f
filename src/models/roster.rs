//! Roster document models.

use serde::{Deserialize, Serialize};

/// Token substituted when a roster entry carries no elemental type.
pub const DEFAULT_TYPE: &str = "Unknown";

/// One entry on a competitor's roster: an entity plus its configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Entity name (unique within one roster)
    pub name: String,

    /// Equipped item
    pub item: String,

    /// Special ability
    pub ability: String,

    /// Elemental type, if the source document recorded one
    #[serde(default)]
    pub elemental_type: Option<String>,

    /// Chosen moves, in document order
    pub moves: Vec<String>,
}

impl RosterEntry {
    /// Create a new entry with no type and no moves.
    pub fn new(name: impl Into<String>, item: impl Into<String>, ability: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: item.into(),
            ability: ability.into(),
            elemental_type: None,
            moves: Vec::new(),
        }
    }

    /// Builder method to set the elemental type.
    pub fn with_type(mut self, elemental_type: impl Into<String>) -> Self {
        self.elemental_type = Some(elemental_type.into());
        self
    }

    /// Builder method to set the move list.
    pub fn with_moves(mut self, moves: Vec<String>) -> Self {
        self.moves = moves;
        self
    }

    /// The elemental type, falling back to [`DEFAULT_TYPE`] when absent.
    pub fn type_or_default(&self) -> &str {
        self.elemental_type.as_deref().unwrap_or(DEFAULT_TYPE)
    }
}

/// A competitor's full roster, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Roster {
    /// Create a roster from entries.
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    /// Entity names in roster order.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Check if the roster contains an entity by exact name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let entry = RosterEntry::new("Foo", "Rod", "Levitate")
            .with_type("Water")
            .with_moves(vec!["Surf".to_string(), "Protect".to_string()]);

        assert_eq!(entry.name, "Foo");
        assert_eq!(entry.item, "Rod");
        assert_eq!(entry.ability, "Levitate");
        assert_eq!(entry.type_or_default(), "Water");
        assert_eq!(entry.moves.len(), 2);
    }

    #[test]
    fn test_type_defaults_when_absent() {
        let entry = RosterEntry::new("Foo", "Rod", "Levitate");
        assert_eq!(entry.type_or_default(), DEFAULT_TYPE);
    }

    #[test]
    fn test_roster_contains_is_case_sensitive() {
        let roster = Roster::new(vec![RosterEntry::new("Foo", "Rod", "Levitate")]);
        assert!(roster.contains("Foo"));
        assert!(!roster.contains("foo"));
    }

    #[test]
    fn test_entry_deserializes_without_type() {
        let json = r#"{"name":"Foo","item":"Rod","ability":"Levitate","moves":["Surf"]}"#;
        let entry: RosterEntry = serde_json::from_str(json).unwrap();
        assert!(entry.elemental_type.is_none());
        assert_eq!(entry.type_or_default(), DEFAULT_TYPE);
    }
}
