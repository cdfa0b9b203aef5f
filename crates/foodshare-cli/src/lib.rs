mod chart;
mod claims;
mod config;
mod listings;
mod load;
mod predict;
mod providers;
mod receivers;
mod report;
mod table;
mod theme;

pub use config::*;

use anyhow::Result;
use clap::{ArgAction, Parser};
use foodshare::Db;
use std::path::PathBuf;

/// Foodshare CLI library for building custom command-line tools
pub struct FoodshareCli {
    db: Db,
    config: Config,
}

impl FoodshareCli {
    /// Create a new FoodshareCli instance with the given database connection
    pub fn new(db: Db) -> Self {
        Self {
            db,
            config: Config::default(),
        }
    }

    /// Create a new FoodshareCli instance with a custom configuration
    pub fn with_config(db: Db, config: Config) -> Self {
        Self { db, config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Execute a parsed command line
    pub fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Command::Load(cmd) => cmd.run(&self.db, &self.config),
            Command::Listings(cmd) => cmd.run(&self.db),
            Command::Claims(cmd) => cmd.run(&self.db),
            Command::Providers(cmd) => cmd.run(&self.db),
            Command::Receivers(cmd) => cmd.run(&self.db),
            Command::Report(cmd) => cmd.run(&self.db),
            Command::Chart(cmd) => cmd.run(&self.db),
            Command::Predict(cmd) => cmd.run(&self.db),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "foodshare")]
#[command(about = "Foodshare - food donation listings, claims and analytics")]
#[command(version)]
pub struct Cli {
    /// Configuration file [default: ./foodshare.toml if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite file or `sqlite:` URL, overriding the configuration
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// More logging (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Reads the configuration this command line points at, with overrides
    /// from its flags applied
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(CONFIG_FILE)?,
        };
        Ok(match &self.database {
            Some(database) => config.database(database.clone()),
            None => config,
        })
    }

    /// The default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Replaces `field` when a new value was given on the command line
fn overwrite<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

#[derive(Parser, Debug)]
enum Command {
    /// Replace the tables with the contents of the CSV files
    Load(load::LoadCommand),

    /// Browse, create, update and delete food listings
    Listings(listings::ListingsCommand),

    /// Browse, create and update claims
    Claims(claims::ClaimsCommand),

    /// Browse, create and update providers
    Providers(providers::ProvidersCommand),

    /// Browse, create and update receivers
    Receivers(receivers::ReceiversCommand),

    /// Run one of the canned analytics reports
    Report(report::ReportCommand),

    /// Bar chart of listings per city, food type or meal type
    Chart(chart::ChartCommand),

    /// Estimate how likely a new claim is to complete
    Predict(predict::PredictCommand),
}
