use anyhow::{Context, Result};
use foodshare::{CsvSources, MissingCsv};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "foodshare.toml";

/// Configuration for the Foodshare CLI, read from `foodshare.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite file path, or a `sqlite:` URL
    pub database: String,

    /// Directory holding the CSV files
    pub data_dir: PathBuf,

    /// What `load` does when a CSV file is missing
    pub missing_csv: MissingCsvPolicy,

    /// Idle connections kept open between statements
    pub max_idle_connections: usize,

    /// CSV file names, relative to `data_dir`
    pub csv: CsvFiles,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCsvPolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvFiles {
    pub providers: PathBuf,
    pub receivers: PathBuf,
    pub food_listings: PathBuf,
    pub claims: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: "food.db".to_string(),
            data_dir: PathBuf::from("."),
            missing_csv: MissingCsvPolicy::Skip,
            max_idle_connections: 4,
            csv: CsvFiles::default(),
        }
    }
}

impl Default for CsvFiles {
    fn default() -> Self {
        Self {
            providers: PathBuf::from("providers_data.csv"),
            receivers: PathBuf::from("receivers_data.csv"),
            food_listings: PathBuf::from("food_listings_data.csv"),
            claims: PathBuf::from("claims_data.csv"),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Loads the config file, or returns the defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if std::fs::exists(&path)? {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    /// Set the database path or URL
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the CSV directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the missing CSV policy
    pub fn missing_csv(mut self, policy: MissingCsvPolicy) -> Self {
        self.missing_csv = policy;
        self
    }

    /// Set the idle connection limit
    pub fn max_idle_connections(mut self, max_idle: usize) -> Self {
        self.max_idle_connections = max_idle;
        self
    }

    /// Full paths of the four CSV files
    pub fn csv_sources(&self) -> CsvSources {
        CsvSources {
            providers: self.data_dir.join(&self.csv.providers),
            receivers: self.data_dir.join(&self.csv.receivers),
            food_listings: self.data_dir.join(&self.csv.food_listings),
            claims: self.data_dir.join(&self.csv.claims),
        }
    }

    /// The database as a `sqlite:` URL
    pub fn database_url(&self) -> String {
        if self.database.starts_with("sqlite:") {
            self.database.clone()
        } else {
            format!("sqlite:{}", self.database)
        }
    }
}

impl From<MissingCsvPolicy> for MissingCsv {
    fn from(policy: MissingCsvPolicy) -> Self {
        match policy {
            MissingCsvPolicy::Skip => MissingCsv::Skip,
            MissingCsvPolicy::Fail => MissingCsv::Fail,
        }
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
