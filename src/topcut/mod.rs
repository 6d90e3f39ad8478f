//! Top-cut selection.
//!
//! Determines which subset of the standings advanced to the playoff bracket.
//! Two mutually exclusive policies are supported:
//! - A fixed-size cut (first `k` competitors in placing order)
//! - A two-day Swiss cutoff (everyone whose day-one record had two or fewer
//!   losses advances)

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::Competitor;

/// Errors from top-cut selection.
#[derive(Debug, Error)]
pub enum TopCutError {
    #[error("cut size {size} is out of range for a field of {field_size}")]
    InvalidCutSize { size: usize, field_size: usize },

    #[error("day-one round count must be at least 1, got {0}")]
    InvalidRoundCount(u32),
}

/// How the playoff cut is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopCutPolicy {
    /// The first `size` competitors in placing order made the cut.
    FixedSize { size: usize },

    /// Two-day format: a competitor advanced iff their day-one record had
    /// two or fewer losses, read off the recorded rounds-survived field as
    /// `rounds_survived >= day_one_rounds - 2`.
    SwissCutoff { day_one_rounds: u32 },
}

/// Select the competitors who made the playoff cut.
///
/// Validation fails fast on an out-of-range parameter; no clamping is
/// performed. The returned competitors keep their original relative order.
pub fn select_top_cut(
    competitors: &[Competitor],
    policy: &TopCutPolicy,
) -> Result<Vec<Competitor>, TopCutError> {
    match *policy {
        TopCutPolicy::FixedSize { size } => {
            if size < 1 || size > competitors.len() {
                return Err(TopCutError::InvalidCutSize {
                    size,
                    field_size: competitors.len(),
                });
            }
            debug!(size, "selecting fixed-size top cut");
            Ok(competitors[..size].to_vec())
        }
        TopCutPolicy::SwissCutoff { day_one_rounds } => {
            if day_one_rounds < 1 {
                return Err(TopCutError::InvalidRoundCount(day_one_rounds));
            }
            let threshold = day_one_rounds.saturating_sub(2);
            let cut: Vec<Competitor> = competitors
                .iter()
                .filter(|c| c.rounds_survived >= threshold)
                .cloned()
                .collect();
            debug!(
                day_one_rounds,
                threshold,
                kept = cut.len(),
                "selected swiss-cutoff top cut"
            );
            Ok(cut)
        }
    }
}
