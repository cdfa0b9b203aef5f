use crate::{overwrite, theme};
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use foodshare::{ClaimStatus, Db, NewClaim};

#[derive(Parser, Debug)]
pub struct ClaimsCommand {
    #[command(subcommand)]
    subcommand: ClaimsSubcommand,
}

#[derive(Parser, Debug)]
enum ClaimsSubcommand {
    /// Show every claim with its food and receiver, newest first
    List,

    /// Show listings that can still be claimed
    Claimable,

    /// Number of claims in each status
    Stats,

    /// Record a new claim
    Add {
        #[arg(long)]
        food_id: i64,

        #[arg(long)]
        receiver_id: i64,

        /// Pending, Completed or Cancelled
        #[arg(long, default_value = "Pending")]
        status: ClaimStatus,

        /// Defaults to the current local time
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// Change fields of an existing claim
    Update {
        claim_id: i64,

        #[arg(long)]
        food_id: Option<i64>,

        #[arg(long)]
        receiver_id: Option<i64>,

        #[arg(long)]
        status: Option<ClaimStatus>,

        #[arg(long)]
        timestamp: Option<String>,
    },
}

impl ClaimsCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        match self.subcommand {
            ClaimsSubcommand::List => list(db),
            ClaimsSubcommand::Claimable => claimable(db),
            ClaimsSubcommand::Stats => stats(db),
            ClaimsSubcommand::Add {
                food_id,
                receiver_id,
                status,
                timestamp,
            } => {
                let claim = db.claims().insert(&NewClaim {
                    food_id,
                    receiver_id,
                    status: Some(status),
                    timestamp: timestamp.or_else(|| Some(now())),
                })?;
                theme::success(format!(
                    "Created claim #{} on listing #{} ({})",
                    claim.claim_id,
                    claim.food_id,
                    status_label(claim.status.as_ref())
                ));
                Ok(())
            }
            ClaimsSubcommand::Update {
                claim_id,
                food_id,
                receiver_id,
                status,
                timestamp,
            } => {
                let mut claim = db
                    .claims()
                    .get(claim_id)?
                    .with_context(|| format!("claim #{claim_id} does not exist"))?
                    .into_new();

                claim.food_id = food_id.unwrap_or(claim.food_id);
                claim.receiver_id = receiver_id.unwrap_or(claim.receiver_id);
                overwrite(&mut claim.status, status);
                overwrite(&mut claim.timestamp, timestamp);

                let claim = db.claims().update(claim_id, &claim)?;
                theme::success(format!(
                    "Updated claim #{} ({})",
                    claim.claim_id,
                    status_label(claim.status.as_ref())
                ));
                Ok(())
            }
        }
    }
}

fn list(db: &Db) -> Result<()> {
    let claims = db.claims().summaries()?;

    theme::heading("Claims");
    if claims.is_empty() {
        theme::note("No claims recorded.");
    }
    for claim in &claims {
        let label = status_label(claim.status.as_ref());
        let status = match claim.status {
            Some(ClaimStatus::Completed) => style(label).green(),
            Some(ClaimStatus::Pending) => style(label).yellow(),
            Some(ClaimStatus::Cancelled) => style(label).red(),
            Some(ClaimStatus::Other(_)) | None => style(label).dim(),
        };
        println!(
            "  #{:<6} {:<10} {} → {}",
            claim.claim_id,
            status,
            claim.food_name.as_deref().unwrap_or("(unknown listing)"),
            claim.receiver_name.as_deref().unwrap_or("(unknown receiver)"),
        );
    }
    println!();
    Ok(())
}

fn claimable(db: &Db) -> Result<()> {
    let listings = db.claims().claimable_listings()?;

    theme::heading("Claimable Listings");
    if listings.is_empty() {
        theme::note("Every listing has an active claim.");
    }
    for listing in &listings {
        println!(
            "  #{:<6} {} {}",
            listing.food_id,
            style(&listing.food_name).bold(),
            style(format!("from {}", listing.provider_name)).dim()
        );
    }
    println!();
    Ok(())
}

fn stats(db: &Db) -> Result<()> {
    let counts = db.claims().status_counts()?;
    let total: i64 = counts.iter().map(|(_, n)| n).sum();

    theme::heading("Claim Status");
    for (status, count) in counts {
        let pct = if total > 0 {
            100.0 * count as f64 / total as f64
        } else {
            0.0
        };
        println!("  {:<10} {:>6} {:>6.1}%", status.as_str(), count, pct);
    }
    println!();
    Ok(())
}

fn status_label(status: Option<&ClaimStatus>) -> &str {
    status.map_or("(no status)", ClaimStatus::as_str)
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
