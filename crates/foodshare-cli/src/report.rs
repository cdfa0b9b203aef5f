use crate::{table, theme};
use anyhow::Result;
use clap::Parser;
use console::style;
use foodshare::{Db, Report};

#[derive(Parser, Debug)]
pub struct ReportCommand {
    /// Report to run; lists the catalogue when omitted
    report: Option<Report>,

    /// Value for reports that take a parameter (e.g. the city for
    /// `providers-in-city`)
    param: Option<String>,

    /// Print the SQL the report runs
    #[arg(long)]
    sql: bool,
}

impl ReportCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        let Some(report) = self.report else {
            catalogue();
            return Ok(());
        };

        let results = report.run(db, self.param.as_deref())?;

        match (report.param(), &self.param) {
            (Some(_), Some(value)) => theme::heading(&format!("{}: {}", report.title(), value)),
            _ => theme::heading(report.title()),
        }
        theme::note(report.description());
        println!();

        if self.sql {
            println!("  {}", style(report.sql()).dim());
            println!();
        }

        if results.is_empty() {
            theme::note("No data available for this report.");
        } else {
            print!("{}", table::render(&results));
        }
        println!();
        Ok(())
    }
}

fn catalogue() {
    theme::heading("Reports");
    for report in Report::ALL {
        let name = match report.param() {
            Some(param) => format!("{} <{}>", report.name(), param),
            None => report.name().to_string(),
        };
        println!("  {:<34} {}", style(name).bold(), report.description());
    }
    println!();
}
