//! Binary entry point: read configuration, start logging, open the winner
//! store, load the static roster and credentials, then hand control to the
//! Ratatui event loop until the operator exits.
use anyhow::{Context, Result};
use tracing::info;

use contest_raffle::{
    run_app, telemetry, App, AppConfig, Credentials, Raffle, Roster, SqliteWinnerStore,
};

fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.telemetry).context("failed to initialise logging")?;

    let roster = match &config.roster_file {
        Some(path) => Roster::from_path(path),
        None => Roster::builtin(),
    }
    .context("failed to load contestant roster")?;

    let credentials = match &config.auth_file {
        Some(path) => Credentials::from_path(path),
        None => Credentials::builtin(),
    }
    .context("failed to load operator credentials")?;

    let store = SqliteWinnerStore::open(&config.database_path())
        .context("failed to open winner store")?;

    info!(
        contestants = roster.len(),
        data_dir = %config.data_dir.display(),
        "starting contest raffle"
    );

    let mut app = App::new(Raffle::new(roster, store), credentials, config.export_dir);
    run_app(&mut app)
}
