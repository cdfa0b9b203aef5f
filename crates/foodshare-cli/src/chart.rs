use crate::{table, theme};
use anyhow::Result;
use clap::Parser;
use foodshare::{
    chart::{self, Dimension},
    Db,
};

#[derive(Parser, Debug)]
pub struct ChartCommand {
    /// location, food-type or meal-type
    dimension: Dimension,
}

impl ChartCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        let counts = chart::category_counts(db, self.dimension)?;

        theme::heading(&format!("Listings by {}", self.dimension.label().to_lowercase()));
        if counts.is_empty() {
            theme::note("No listings to chart.");
        } else {
            let items: Vec<(String, i64)> = counts
                .into_iter()
                .map(|count| (count.category, count.count))
                .collect();
            print!("{}", table::bars(&items));
        }
        println!();
        Ok(())
    }
}
