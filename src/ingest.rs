//! Loading of downloaded tournament documents.
//!
//! Consumes already-fetched, already-parsed structured documents from disk:
//! a standings JSON file whose rows reference per-competitor roster JSON
//! files. Fetching, caching, and markup parsing happen upstream; this module
//! only joins the two document kinds into [`Competitor`] values.
//!
//! A missing or malformed roster document aborts the load before any
//! aggregation can start, so a run never silently skips a competitor.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Competitor, Roster, TournamentMeta};

/// Errors that can occur while loading tournament documents.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read standings document {path}: {source}")]
    StandingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse standings document {path}: {source}")]
    StandingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Missing roster document for {competitor} at {path}")]
    MissingRoster { competitor: String, path: PathBuf },

    #[error("Failed to read roster document {path}: {source}")]
    RosterRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse roster document {path} for {competitor}: {source}")]
    RosterParse {
        competitor: String,
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One row of the standings document.
#[derive(Debug, Deserialize)]
struct StandingsRow {
    placing: u32,
    name: String,
    rounds_survived: u32,
    /// Roster document file name, relative to the roster directory
    roster: String,
}

/// The standings document as downloaded.
#[derive(Debug, Deserialize)]
struct StandingsDoc {
    tournament: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    rows: Vec<StandingsRow>,
}

/// Load a tournament: standings plus every referenced roster.
///
/// Rows are returned in document order, which is placing order.
pub fn load_tournament(
    standings_path: &Path,
    roster_dir: &Path,
) -> Result<(TournamentMeta, Vec<Competitor>), IngestError> {
    let content =
        std::fs::read_to_string(standings_path).map_err(|source| IngestError::StandingsRead {
            path: standings_path.to_path_buf(),
            source,
        })?;
    let doc: StandingsDoc =
        serde_json::from_str(&content).map_err(|source| IngestError::StandingsParse {
            path: standings_path.to_path_buf(),
            source,
        })?;

    let mut competitors = Vec::with_capacity(doc.rows.len());
    for row in doc.rows {
        let roster = load_roster(roster_dir, &row.roster, &row.name)?;
        debug!(
            competitor = %row.name,
            placing = row.placing,
            entries = roster.entries.len(),
            "loaded roster"
        );
        competitors.push(Competitor::new(
            row.placing,
            row.name,
            row.rounds_survived,
            roster,
        ));
    }

    let mut meta = TournamentMeta::new(doc.tournament);
    if let Some(date) = doc.date {
        meta = meta.with_date(date);
    }

    info!(
        tournament = %meta.name,
        competitors = competitors.len(),
        "loaded tournament documents"
    );
    Ok((meta, competitors))
}

fn load_roster(roster_dir: &Path, file_name: &str, competitor: &str) -> Result<Roster, IngestError> {
    let path = roster_dir.join(file_name);
    if !path.exists() {
        return Err(IngestError::MissingRoster {
            competitor: competitor.to_string(),
            path,
        });
    }

    let content = std::fs::read_to_string(&path).map_err(|source| IngestError::RosterRead {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| IngestError::RosterParse {
        competitor: competitor.to_string(),
        path,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_roster(dir: &Path, file_name: &str) {
        let roster = r#"{"entries":[{"name":"Foo","item":"Rod","ability":"Levitate","moves":["Surf"]}]}"#;
        fs::write(dir.join(file_name), roster).unwrap();
    }

    fn write_standings(dir: &Path, rows: &str) -> PathBuf {
        let path = dir.join("standings.json");
        let doc = format!(
            r#"{{"tournament":"Test Cup","date":"2026-03-14","rows":[{rows}]}}"#
        );
        fs::write(&path, doc).unwrap();
        path
    }

    #[test]
    fn test_load_tournament() {
        let dir = tempfile::tempdir().unwrap();
        write_roster(dir.path(), "p1.json");
        write_roster(dir.path(), "p2.json");
        let standings = write_standings(
            dir.path(),
            r#"{"placing":1,"name":"Ash","rounds_survived":8,"roster":"p1.json"},
               {"placing":2,"name":"Gary","rounds_survived":7,"roster":"p2.json"}"#,
        );

        let (meta, competitors) = load_tournament(&standings, dir.path()).unwrap();

        assert_eq!(meta.name, "Test Cup");
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2026, 3, 14));
        assert_eq!(competitors.len(), 2);
        assert_eq!(competitors[0].name, "Ash");
        assert_eq!(competitors[0].roster.entries[0].name, "Foo");
        assert_eq!(competitors[1].placing, 2);
    }

    #[test]
    fn test_missing_roster_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_roster(dir.path(), "p1.json");
        let standings = write_standings(
            dir.path(),
            r#"{"placing":1,"name":"Ash","rounds_survived":8,"roster":"p1.json"},
               {"placing":2,"name":"Gary","rounds_survived":7,"roster":"absent.json"}"#,
        );

        let result = load_tournament(&standings, dir.path());
        assert!(matches!(result, Err(IngestError::MissingRoster { .. })));
    }

    #[test]
    fn test_malformed_roster_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("p1.json"), "not json").unwrap();
        let standings = write_standings(
            dir.path(),
            r#"{"placing":1,"name":"Ash","rounds_survived":8,"roster":"p1.json"}"#,
        );

        let result = load_tournament(&standings, dir.path());
        assert!(matches!(result, Err(IngestError::RosterParse { .. })));
    }

    #[test]
    fn test_malformed_standings_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("standings.json");
        fs::write(&path, "[broken").unwrap();

        let result = load_tournament(&path, dir.path());
        assert!(matches!(result, Err(IngestError::StandingsParse { .. })));
    }

    #[test]
    fn test_standings_date_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        write_roster(dir.path(), "p1.json");
        let path = dir.path().join("standings.json");
        fs::write(
            &path,
            r#"{"tournament":"No Date Open","rows":[{"placing":1,"name":"Ash","rounds_survived":8,"roster":"p1.json"}]}"#,
        )
        .unwrap();

        let (meta, _) = load_tournament(&path, dir.path()).unwrap();
        assert!(meta.date.is_none());
    }
}
