//! Report and snapshot output.
//!
//! Renders a [`UsageSummary`] two ways:
//! - a line-oriented text report for humans (entities one indent level deep,
//!   named sub-statistics two deep, individual line items three deep)
//! - a pretty-printed JSON snapshot whose map ordering matches the ranked
//!   order, so consecutive runs diff cleanly

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{EntityStats, TournamentMeta, UsageSummary, UsageTable};
use crate::rank::{percentage, rank, rank_frequency_map};

const INDENT: &str = "  ";

/// Errors that can occur while writing report artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One counted line item inside an entity snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrequencyEntry {
    pub count: u32,
    pub pct: f64,
}

/// Ranked, percentage-annotated statistics for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub count: u32,

    /// Usage rate within the subset, as a percentage
    pub usage_pct: f64,

    pub items: IndexMap<String, FrequencyEntry>,
    pub abilities: IndexMap<String, FrequencyEntry>,
    pub types: IndexMap<String, FrequencyEntry>,
    pub moves: IndexMap<String, FrequencyEntry>,
    pub teammates: IndexMap<String, FrequencyEntry>,
    pub placings: Vec<u32>,
}

/// Reloadable snapshot of one tournament run: both tables in ranked order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub tournament: TournamentMeta,
    pub computed_at: DateTime<Utc>,
    pub field_size: usize,
    pub top_cut_size: usize,
    pub top_cut: IndexMap<String, EntitySnapshot>,
    pub field: IndexMap<String, EntitySnapshot>,
}

/// Paths of the artifacts one run produced.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub snapshot: PathBuf,
}

fn snapshot_frequency_map(
    map: &HashMap<String, u32>,
    denominator: u32,
) -> IndexMap<String, FrequencyEntry> {
    rank_frequency_map(map)
        .into_iter()
        .map(|(name, count)| {
            (
                name.to_string(),
                FrequencyEntry {
                    count,
                    pct: percentage(count, denominator),
                },
            )
        })
        .collect()
}

fn snapshot_entity(stats: &EntityStats, subset_size: usize) -> EntitySnapshot {
    EntitySnapshot {
        count: stats.count,
        usage_pct: percentage(stats.count, subset_size as u32),
        items: snapshot_frequency_map(&stats.item_usage, stats.count),
        abilities: snapshot_frequency_map(&stats.ability_usage, stats.count),
        types: snapshot_frequency_map(&stats.type_usage, stats.count),
        // Moves and teammates also use the entity count as denominator, so
        // their percentages read as "share of this entity's appearances".
        moves: snapshot_frequency_map(&stats.move_usage, stats.count),
        teammates: snapshot_frequency_map(&stats.teammate_usage, stats.count),
        placings: stats.placings.clone(),
    }
}

fn snapshot_table(table: &UsageTable, subset_size: usize) -> IndexMap<String, EntitySnapshot> {
    rank(table)
        .into_iter()
        .map(|(name, stats)| (name.to_string(), snapshot_entity(stats, subset_size)))
        .collect()
}

/// Build the machine-readable snapshot for a summary.
pub fn build_snapshot(summary: &UsageSummary) -> UsageSnapshot {
    UsageSnapshot {
        tournament: summary.tournament.clone(),
        computed_at: Utc::now(),
        field_size: summary.field_size,
        top_cut_size: summary.top_cut_size,
        top_cut: snapshot_table(&summary.top_cut, summary.top_cut_size),
        field: snapshot_table(&summary.field, summary.field_size),
    }
}

fn write_table_section(
    out: &mut String,
    title: &str,
    table: &UsageTable,
    subset_size: usize,
) {
    let _ = writeln!(out, "{title}:");
    for (rank_index, (name, stats)) in rank(table).into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{INDENT}{}. {}: {}% ({})",
            rank_index + 1,
            name,
            percentage(stats.count, subset_size as u32),
            stats.count
        );

        let sections = [
            ("Items", &stats.item_usage),
            ("Abilities", &stats.ability_usage),
            ("Types", &stats.type_usage),
            ("Moves", &stats.move_usage),
            ("Teammates", &stats.teammate_usage),
        ];
        for (heading, map) in sections {
            let _ = writeln!(out, "{INDENT}{INDENT}{heading}:");
            for (item, count) in rank_frequency_map(map) {
                let _ = writeln!(
                    out,
                    "{INDENT}{INDENT}{INDENT}{}: {}% ({})",
                    item,
                    percentage(count, stats.count),
                    count
                );
            }
        }

        let placings: Vec<String> = stats.placings.iter().map(u32::to_string).collect();
        let _ = writeln!(out, "{INDENT}{INDENT}Placings: {}", placings.join(", "));
    }
}

/// Render the human-readable text report.
pub fn render_text(summary: &UsageSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tournament: {}", summary.tournament.name);
    if let Some(date) = summary.tournament.date {
        let _ = writeln!(out, "Date: {date}");
    }
    let _ = writeln!(out, "Entrants: {}", summary.field_size);
    let _ = writeln!(out, "Top Cut: {}", summary.top_cut_size);
    let _ = writeln!(out);

    write_table_section(&mut out, "Top Cut Usage", &summary.top_cut, summary.top_cut_size);
    let _ = writeln!(out);
    write_table_section(&mut out, "All Usage", &summary.field, summary.field_size);

    out
}

/// Write the text report and JSON snapshot into `output_dir`.
///
/// File names derive from the tournament name; the caller is responsible
/// for passing a name already safe for use in paths.
pub fn write_report(summary: &UsageSummary, output_dir: &Path) -> Result<ReportPaths, ReportError> {
    fs::create_dir_all(output_dir)?;

    let text_path = output_dir.join(format!("{}-usage.txt", summary.tournament.name));
    let mut writer = BufWriter::new(File::create(&text_path)?);
    writer.write_all(render_text(summary).as_bytes())?;
    writer.flush()?;

    let snapshot_path = output_dir.join(format!("{}-usage.json", summary.tournament.name));
    let snapshot = build_snapshot(summary);
    let mut writer = BufWriter::new(File::create(&snapshot_path)?);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writer.flush()?;

    info!(
        text = %text_path.display(),
        snapshot = %snapshot_path.display(),
        "wrote report artifacts"
    );

    Ok(ReportPaths {
        text: text_path,
        snapshot: snapshot_path,
    })
}
