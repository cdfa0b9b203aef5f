use crate::{overwrite, theme, theme::dialoguer_theme};
use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::{Input, Select};
use foodshare::{
    scorer::{Candidate, Model, Outlook, DEFAULT_QUANTITY},
    Db,
};

#[derive(Parser, Debug)]
pub struct PredictCommand {
    /// Units on offer; defaults to 50
    #[arg(long)]
    quantity: Option<u64>,

    #[arg(long)]
    provider_type: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    food_type: Option<String>,

    #[arg(long)]
    meal_type: Option<String>,

    /// Prompt for every value not given as a flag
    #[arg(short, long)]
    interactive: bool,

    /// Also show the features with the most influence
    #[arg(long, value_name = "N")]
    factors: Option<usize>,
}

impl PredictCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        theme::heading("Claim Success Prediction");

        let model = Model::fit_from(db)?;
        let summary = model.summary();
        println!(
            "  {} trained on {} claims, tested on {}",
            style("Model").bold(),
            summary.train_size,
            summary.test_size
        );
        println!(
            "  {} {:.1}%   {} {:.1}%",
            style("Accuracy").bold(),
            summary.accuracy * 100.0,
            style("Completion rate").bold(),
            summary.positive_rate * 100.0
        );
        println!();

        let factors = self.factors;
        let candidate = self.candidate(db)?;
        let prediction = model.predict(&candidate);

        let probability = format!("{:.1}%", prediction.probability * 100.0);
        let probability = match prediction.outlook {
            Outlook::High => style(probability).green().bold(),
            Outlook::Moderate => style(probability).yellow().bold(),
            Outlook::Low => style(probability).red().bold(),
        };
        println!("  Predicted success probability: {probability}");
        println!(
            "  Confidence: {:.1}%   Outlook: {}",
            prediction.confidence * 100.0,
            prediction.outlook
        );
        println!();

        if let Some(n) = factors {
            println!("  {}", style("Most influential features").bold());
            for (name, weight) in model.coefficients().into_iter().take(n) {
                println!("    {weight:>+8.3}  {name}");
            }
            println!();
        }

        Ok(())
    }

    fn candidate(self, db: &Db) -> Result<Candidate> {
        let mut candidate = Candidate {
            quantity: self.quantity.unwrap_or(DEFAULT_QUANTITY),
            provider_type: None,
            location: None,
            food_type: None,
            meal_type: None,
        };
        overwrite(&mut candidate.provider_type, self.provider_type);
        overwrite(&mut candidate.location, self.location);
        overwrite(&mut candidate.food_type, self.food_type);
        overwrite(&mut candidate.meal_type, self.meal_type);

        if !self.interactive {
            return Ok(candidate);
        }

        let options = db.listings().filter_options()?;
        if self.quantity.is_none() {
            candidate.quantity = Input::with_theme(&dialoguer_theme())
                .with_prompt("  Quantity")
                .default(DEFAULT_QUANTITY)
                .interact_text()?;
        }
        prompt(&mut candidate.provider_type, "Provider type", &options.provider_types)?;
        prompt(&mut candidate.location, "Location", &options.locations)?;
        prompt(&mut candidate.food_type, "Food type", &options.food_types)?;
        prompt(&mut candidate.meal_type, "Meal type", &options.meal_types)?;

        Ok(candidate)
    }
}

/// Asks for `field` from `choices` unless it was already given
fn prompt(field: &mut Option<String>, label: &str, choices: &[String]) -> Result<()> {
    if field.is_some() || choices.is_empty() {
        return Ok(());
    }
    let index = Select::with_theme(&dialoguer_theme())
        .with_prompt(format!("  {label}"))
        .items(choices)
        .default(0)
        .interact()?;
    *field = Some(choices[index].clone());
    Ok(())
}
