use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use usage_meta::config::AppConfig;
use usage_meta::topcut::TopCutPolicy;
use usage_meta::{build_summary, ingest, plot, report};

#[derive(Parser)]
#[command(name = "usage-meta")]
#[command(about = "Tournament usage statistics and top-cut comparison plots")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a tournament and write the report, snapshot, and plots
    Run {
        /// Path to the downloaded standings JSON document
        standings: PathBuf,

        /// Directory holding the downloaded roster JSON documents
        #[arg(long, default_value = "./rosters")]
        roster_dir: PathBuf,

        /// Fixed top-cut size (mutually exclusive with --day-one-rounds)
        #[arg(long)]
        cut_size: Option<usize>,

        /// Day-one Swiss round count for the two-day cutoff rule
        /// (mutually exclusive with --cut-size)
        #[arg(long)]
        day_one_rounds: Option<u32>,

        /// Output directory (overrides the configured one)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Aggregate and report but skip plot rendering
        #[arg(long)]
        skip_plots: bool,

        /// Load and aggregate but write nothing
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting usage-meta v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(std::path::Path::new(&cli.config))
        .with_context(|| format!("loading config from {}", cli.config))?;

    match cli.command {
        Commands::Run {
            standings,
            roster_dir,
            cut_size,
            day_one_rounds,
            output_dir,
            skip_plots,
            dry_run,
        } => {
            let policy = match (cut_size, day_one_rounds) {
                (Some(size), None) => TopCutPolicy::FixedSize { size },
                (None, Some(rounds)) => TopCutPolicy::SwissCutoff {
                    day_one_rounds: rounds,
                },
                (Some(_), Some(_)) => {
                    bail!("--cut-size and --day-one-rounds are mutually exclusive")
                }
                (None, None) => bail!("one of --cut-size or --day-one-rounds is required"),
            };

            let (meta, competitors) = ingest::load_tournament(&standings, &roster_dir)
                .context("loading tournament documents")?;

            let summary = build_summary(meta, &competitors, &policy)
                .context("selecting the top cut")?;

            tracing::info!(
                tournament = %summary.tournament.name,
                entrants = summary.field_size,
                top_cut = summary.top_cut_size,
                entities = summary.field.len(),
                "aggregated tournament"
            );

            if dry_run {
                tracing::info!("dry run, skipping artifact output");
                return Ok(());
            }

            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());

            let paths = report::write_report(&summary, &output_dir)
                .context("writing report artifacts")?;
            println!("Report:   {}", paths.text.display());
            println!("Snapshot: {}", paths.snapshot.display());

            if !skip_plots {
                let plots = plot::render_plots(&summary, &config.plot, &output_dir)
                    .context("rendering usage plots")?;
                println!("Plots:    {}", plots.zoomed.display());
                println!("          {}", plots.full.display());
            }
        }
    }

    Ok(())
}
