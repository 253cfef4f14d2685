use anyhow::Context;

use fedtracker_data::logging::init_logging;
use fedtracker_data::{tasks, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let _guard = init_logging(&config.logging);

    tasks::generate_occupation_families(&config.paths()).context("Failed to generate occupation families")?;
    Ok(())
}
