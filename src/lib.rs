//! # Usage Meta
//!
//! Tournament usage statistics for competitive team rosters.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (rosters, competitors, usage tables)
//! - **ingest**: Loading of downloaded standings/roster documents
//! - **topcut**: Playoff-cut selection policies
//! - **aggregate**: Per-entity usage accumulation
//! - **rank**: Deterministic ordering and percentage computation
//! - **report**: Text report and JSON snapshot output
//! - **plot**: Comparative scatter plot rendering
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod plot;
pub mod rank;
pub mod report;
pub mod topcut;

pub use models::*;

use topcut::{select_top_cut, TopCutError, TopCutPolicy};

/// Build the full usage summary for one tournament: aggregate the whole
/// field, select and aggregate the top cut, and pair the two tables.
///
/// The two aggregations are independent calls over independent inputs; the
/// resulting tables never share records.
pub fn build_summary(
    tournament: TournamentMeta,
    competitors: &[Competitor],
    policy: &TopCutPolicy,
) -> Result<UsageSummary, TopCutError> {
    let cut = select_top_cut(competitors, policy)?;
    let field_table = aggregate::aggregate(competitors);
    let cut_table = aggregate::aggregate(&cut);

    Ok(UsageSummary::new(
        tournament,
        field_table,
        competitors.len(),
        cut_table,
        cut.len(),
    ))
}
