//! Bulk load of the four tables from CSV files.
//!
//! Each table is replaced inside its own transaction: the old table is
//! dropped, recreated from the schema, filled, and re-indexed, or nothing
//! changes at all.

mod csv_table;
use csv_table::CsvTable;

pub(crate) mod normalize;

use crate::Db;

use foodshare_core::{
    schema::{self, Table},
    Error, Result,
};
use std::path::{Path, PathBuf};

/// What to do when one of the CSV files does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingCsv {
    /// Log a warning and leave that table as it was.
    #[default]
    Skip,

    /// Fail before any table is touched.
    Fail,
}

/// Locations of the four input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSources {
    pub providers: PathBuf,
    pub receivers: PathBuf,
    pub food_listings: PathBuf,
    pub claims: PathBuf,
}

impl CsvSources {
    /// The conventional file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            providers: dir.join("providers_data.csv"),
            receivers: dir.join("receivers_data.csv"),
            food_listings: dir.join("food_listings_data.csv"),
            claims: dir.join("claims_data.csv"),
        }
    }

    /// Each source paired with its table, in load order.
    pub fn tables(&self) -> [(&'static Table, &Path); 4] {
        [
            (&schema::PROVIDERS, &self.providers),
            (&schema::RECEIVERS, &self.receivers),
            (&schema::FOOD_LISTINGS, &self.food_listings),
            (&schema::CLAIMS, &self.claims),
        ]
    }
}

/// Summary of one load run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tables: Vec<TableLoad>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoad {
    pub table: &'static str,
    pub outcome: LoadOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { rows: usize },
    Skipped { path: PathBuf },
}

impl LoadReport {
    /// Tables left untouched because their CSV was missing.
    pub fn skipped(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tables
            .iter()
            .filter(|t| matches!(t.outcome, LoadOutcome::Skipped { .. }))
            .map(|t| t.table)
    }

    pub fn is_complete(&self) -> bool {
        self.skipped().next().is_none()
    }

    pub fn rows(&self, table: &str) -> Option<usize> {
        self.tables.iter().find_map(|t| match t.outcome {
            LoadOutcome::Loaded { rows } if t.table == table => Some(rows),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub struct Loader<'a> {
    db: &'a Db,
    missing_csv: MissingCsv,
}

impl<'a> Loader<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self {
            db,
            missing_csv: MissingCsv::default(),
        }
    }

    pub fn missing_csv(mut self, policy: MissingCsv) -> Self {
        self.missing_csv = policy;
        self
    }

    /// Loads all four tables, replacing their contents.
    pub fn load(&self, sources: &CsvSources) -> Result<LoadReport> {
        if self.missing_csv == MissingCsv::Fail {
            if let Some((_, path)) = sources.tables().into_iter().find(|(_, p)| !p.exists()) {
                return Err(Error::csv_not_found(path));
            }
        }

        self.db.push_schema()?;

        let mut report = LoadReport::default();

        for (table, path) in sources.tables() {
            let outcome = if path.exists() {
                let rows = self.load_table(table, path)?;
                log::info!("loaded {rows} rows into {}", table.name);
                LoadOutcome::Loaded { rows }
            } else {
                log::warn!("CSV not found: {}; skipping {}", path.display(), table.name);
                LoadOutcome::Skipped {
                    path: path.to_path_buf(),
                }
            };

            report.tables.push(TableLoad {
                table: table.name,
                outcome,
            });
        }

        Ok(report)
    }

    /// Replaces one table with the contents of `path`.
    pub fn load_table(&self, table: &'static Table, path: &Path) -> Result<usize> {
        // Parse fully before opening the transaction so a bad file never
        // touches the database.
        let csv = CsvTable::read(table, path)?;
        let insert = table.insert_sql();

        self.db.transaction(|tx| {
            tx.execute(&format!("DROP TABLE IF EXISTS {}", table.name), &[])?;
            tx.execute(&table.create_table_sql(), &[])?;

            for (line, row) in csv.rows.iter().enumerate() {
                tx.execute(&insert, row).map_err(|err| {
                    // +2: one for the header, one for 1-based numbering
                    err.context(format!("{}: row {}", path.display(), line + 2))
                })?;
            }

            for sql in table.create_indices_sql() {
                tx.execute(&sql, &[])?;
            }

            Ok(csv.rows.len())
        })
    }
}
