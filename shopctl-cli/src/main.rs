//! shopctl - interactive console for the auto-repair shop database
//!
//! Connects to PostgreSQL, runs the main menu until the user exits or input
//! ends, then disconnects.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use shopctl_core::{Shop, ShopError};
use shopctl_db::{ConnectionSettings, PgShopStore};
use tracing::{debug, error, info};

mod config;
mod terminal;
mod tracing_setup;
mod ui;

use config::ShopConfig;

#[derive(Parser, Debug)]
#[command(
    name = "shopctl",
    author,
    version,
    about = "Interactive console for the auto-repair shop database",
    long_about = "Add customers, mechanics and cars, open and close service requests, \
                  and run the shop's billing and service reports against PostgreSQL."
)]
struct Cli {
    /// Database name
    dbname: String,

    /// Server port
    port: u16,

    /// Database user
    user: String,

    /// Server host (defaults to [database] host in the config, then localhost)
    #[arg(long)]
    host: Option<String>,

    /// Database password
    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Config file (defaults to ~/.shopctl/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Suppress the connection spinner
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl Cli {
    fn connection_settings(&self, config: &ShopConfig) -> ConnectionSettings {
        ConnectionSettings {
            host: self
                .host
                .clone()
                .unwrap_or_else(|| config.host().to_string()),
            port: self.port,
            dbname: self.dbname.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    config::load_dotenv();
    let cli = Cli::parse();

    let config = ShopConfig::load(cli.config.as_deref())?;
    if let Err(err) = tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        level: config.log_level().to_string(),
    }) {
        eprintln!("Warning: logging disabled: {}", err);
    }
    ui::init_quiet_mode(cli.quiet);

    let settings = cli.connection_settings(&config);
    let Some(store) = open_session(&settings).await else {
        return Ok(ExitCode::FAILURE);
    };

    let input = terminal::session_input(config.cancel_keyword());
    let mut shop = Shop::new(store, input, io::stdout());
    let outcome = shop.run_menu().await;
    let (store, _, _) = shop.into_parts();

    let ended = session_end(outcome, &mut io::stderr());
    close_session(&store).await;
    match ended {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(err) => Err(err).context("console session failed"),
    }
}

/// Whether the menu loop ended cleanly. Store errors are printed to `stderr`.
fn session_end(
    outcome: shopctl_core::Result<()>,
    stderr: &mut impl Write,
) -> Result<bool, ShopError> {
    match outcome {
        Ok(()) => Ok(true),
        Err(ShopError::Store(err)) => {
            error!(error = %err, "session ended by store error");
            writeln!(stderr, "{}", err)?;
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Connect, printing progress and the connection URL
async fn open_session(settings: &ConnectionSettings) -> Option<PgShopStore> {
    let pb = ui::spinner("Connecting to database...");
    if pb.is_none() {
        println!("Connecting to database...");
    }
    println!("Connection URL: {}", settings.display_url());
    debug!(host = %settings.host, port = settings.port, user = %settings.user, "connecting");

    match shopctl_db::connect(settings).await {
        Ok(pool) => {
            ui::finish_success(pb, "Connected");
            println!("Done");
            info!(url = %settings.display_url(), "connected");
            Some(PgShopStore::new(pool))
        }
        Err(err) => {
            ui::finish_error(pb, "Connection failed");
            error!(error = %err, "connection failed");
            eprintln!("Error - Unable to Connect to Database: {}", err);
            eprintln!("Make sure you started postgres on this machine");
            None
        }
    }
}

async fn close_session(store: &PgShopStore) {
    print!("Disconnecting from database...");
    store.close().await;
    println!("Done\n\nBye !");
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopctl_core::StoreError;

    #[test]
    fn store_error_is_reported_on_stderr() {
        let mut stderr = Vec::new();
        let outcome = Err(StoreError::conflict("car", "VIN1").into());

        assert!(!session_end(outcome, &mut stderr).unwrap());
        assert_eq!(
            String::from_utf8(stderr).unwrap(),
            "conflict: car 'VIN1' already exists\n"
        );
    }

    #[test]
    fn clean_exit_writes_nothing() {
        let mut stderr = Vec::new();
        assert!(session_end(Ok(()), &mut stderr).unwrap());
        assert!(stderr.is_empty());
    }

    #[test]
    fn abandoned_session_is_passed_up() {
        let mut stderr = Vec::new();
        let ended = session_end(Err(ShopError::Abandoned), &mut stderr);
        assert!(matches!(ended, Err(ShopError::Abandoned)));
    }
}
