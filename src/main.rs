use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use fedtracker_data::logging::init_logging;
use fedtracker_data::{tasks, Config};

#[derive(Parser)]
#[command(name = "fedtracker_data")]
#[command(about = "Normalize and enrich the federal workforce data files")]
#[command(version = "0.1.0")]
struct Cli {
    /// Data directory (overrides fedtracker.toml and FEDTRACKER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve display names in brain-drain.json
    Names,
    /// Map location codes in geographic-impact.json to state abbreviations
    Geography,
    /// Add national comparisons and narratives to state detail files
    Enrich,
    /// Write the CSV downloads
    Export,
    /// Roll occupations up into occupation families
    Families,
    /// Generate agency head-to-head comparison files
    Comparisons,
    /// Run every step in order
    All,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    let _guard = init_logging(&config.logging);

    let paths = config.paths();
    info!(data_dir = %paths.root().display(), "starting");

    let result = match cli.command {
        Commands::Names => tasks::fix_brain_drain_names(&paths).map(|_| ()),
        Commands::Geography => tasks::fix_geographic_separations(&paths).map(|_| ()),
        Commands::Enrich => tasks::enrich_state_details(&paths).map(|_| ()),
        Commands::Export => tasks::generate_csv_exports(&paths).map(|_| ()),
        Commands::Families => tasks::generate_occupation_families(&paths).map(|_| ()),
        Commands::Comparisons => tasks::generate_comparisons(&paths).map(|_| ()),
        Commands::All => tasks::run_all(&paths),
    };

    if let Err(e) = &result {
        error!("Step failed: {}", e);
    }
    result.with_context(|| format!("Pipeline step failed for {}", paths.root().display()))
}
