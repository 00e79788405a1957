//! xT-GK CLI
//!
//! Event file → xT-GK report, plus a dump of the zone grid in use

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing::Level;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;
#[cfg(feature = "cli")]
use xtgk_core::{PitchZoneGrid, ValuationConfig, ZoneValueMap};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "xtgk")]
#[command(about = "Value goalkeeper actions with xT-GK", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Analyze an event file and report per-goalkeeper profiles
    Analyze {
        /// Input events JSON (array or {"events": [...]})
        #[arg(long)]
        events: PathBuf,

        /// Valuation config (JSON or YAML); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the full report here instead of printing a summary only
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the zone value map of risk-adjusted xT-GK
        #[arg(long)]
        heatmap: bool,

        /// Restrict the heatmap to one goalkeeper id
        #[arg(long)]
        player: Option<u64>,
    },

    /// Print the base threat grid for a config
    Grid {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { events, config, out, heatmap, player } => {
            let config = resolve_config(config.as_deref())?;
            println!("Analyzing events...");
            println!("   Input:  {}", events.display());

            let response = xtgk_cli::run_analysis(&events, config)?;
            print_summary(&response);

            if heatmap {
                let grid = PitchZoneGrid::from_config(&config.grid);
                let map = ZoneValueMap::build(&grid, &response.report.action_values, player);
                print_zone_map(&map);
            }

            if let Some(out) = out {
                xtgk_cli::write_json(&out, &response)?;
                println!("\nReport saved to: {}", out.display());
            }
        }

        Commands::Grid { config } => {
            let config = resolve_config(config.as_deref())?;
            let grid = PitchZoneGrid::from_config(&config.grid);
            println!("Zone grid {}x{} (rows run own goal → opponent goal)", grid.length_zones(), grid.width_zones());
            for row in xtgk_cli::grid_rows(&grid) {
                let cells: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
                println!("   {}", cells.join(" "));
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn resolve_config(path: Option<&Path>) -> Result<ValuationConfig> {
    match path {
        Some(path) => xtgk_cli::load_config(path),
        None => Ok(ValuationConfig::default()),
    }
}

#[cfg(feature = "cli")]
fn print_summary(response: &xtgk_core::AnalyzeResponse) {
    let summary = &response.report.summary;
    println!("\nDone ({} strategy)", response.strategy);
    println!("   Received:          {}", summary.received);
    println!("   Goalkeeper events: {}", summary.goalkeeper_events);
    println!("   Outfield dropped:  {}", summary.non_goalkeeper_dropped);
    println!("   Skipped:           {}", summary.total_skipped());

    for profile in response.report.profiles.values() {
        println!(
            "   #{:<8} {:<28} {:>4} actions  total {:>8.4}  avg {:>7.4}  completion {:>5.1}%",
            profile.player_id,
            profile.player_name,
            profile.action_count,
            profile.total_value,
            profile.average_value,
            profile.pass_completion_rate * 100.0
        );
    }
}

#[cfg(feature = "cli")]
fn print_zone_map(map: &ZoneValueMap) {
    println!("\nZone value map ({} actions)", map.total_actions());
    for zx in 0..map.length_zones {
        let cells: Vec<String> = (0..map.width_zones)
            .map(|zy| match map.cell(zx, zy) {
                Some(cell) if cell.count > 0 => format!("{:>8.4}", cell.mean()),
                _ => format!("{:>8}", "."),
            })
            .collect();
        println!("   {}", cells.join(" "));
    }
    if let Some((zx, zy)) = map.hottest_zone() {
        println!("   Hottest zone: ({}, {})", zx, zy);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("xtgk CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
