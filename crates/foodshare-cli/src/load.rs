use crate::{theme, Config, MissingCsvPolicy};
use anyhow::Result;
use clap::Parser;
use console::style;
use foodshare::{loader::LoadOutcome, Db, Loader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct LoadCommand {
    /// Directory holding the CSV files, overriding the configuration
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Fail instead of skipping when a CSV file is missing
    #[arg(long)]
    strict: bool,
}

impl LoadCommand {
    pub(crate) fn run(self, db: &Db, config: &Config) -> Result<()> {
        let mut config = config.clone();
        if let Some(dir) = self.data_dir {
            config = config.data_dir(dir);
        }
        if self.strict {
            config = config.missing_csv(MissingCsvPolicy::Fail);
        }

        theme::heading("Load CSV Data");

        let report = Loader::new(db)
            .missing_csv(config.missing_csv.into())
            .load(&config.csv_sources())?;

        for table in &report.tables {
            match &table.outcome {
                LoadOutcome::Loaded { rows } => {
                    theme::success(format!("{}: {} rows", style(table.table).bold(), rows));
                }
                LoadOutcome::Skipped { path } => println!(
                    "  {} {}: {} not found, left unchanged",
                    style("!").yellow().bold(),
                    style(table.table).bold(),
                    path.display()
                ),
            }
        }

        println!();
        if report.is_complete() {
            println!("  {}", style("All tables loaded").green().bold());
        } else {
            theme::note(format!("{} table(s) skipped", report.skipped().count()));
        }
        println!();

        Ok(())
    }
}
