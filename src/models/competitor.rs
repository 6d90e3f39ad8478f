//! Standings models.

use serde::{Deserialize, Serialize};

use super::Roster;

/// One standings row joined with its resolved roster document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    /// Final placing (1 = winner)
    pub placing: u32,

    /// Player name as listed in the standings
    pub name: String,

    /// Swiss rounds the competitor's record survived (day-one cutoff input)
    pub rounds_survived: u32,

    /// The roster the competitor brought
    pub roster: Roster,
}

impl Competitor {
    /// Create a new competitor.
    pub fn new(placing: u32, name: impl Into<String>, rounds_survived: u32, roster: Roster) -> Self {
        Self {
            placing,
            name: name.into(),
            rounds_survived,
            roster,
        }
    }

    /// Check if this is the tournament winner.
    pub fn is_winner(&self) -> bool {
        self.placing == 1
    }
}
