use crate::{overwrite, table, theme};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser};
use console::style;
use foodshare::{repo::ListingFilter, Db, Expiry, NewFoodListing};

#[derive(Parser, Debug)]
pub struct ListingsCommand {
    #[command(subcommand)]
    subcommand: ListingsSubcommand,
}

#[derive(Parser, Debug)]
enum ListingsSubcommand {
    /// Show listings with their provider, optionally filtered
    List(FilterArgs),

    /// Show the values each filter accepts
    Options,

    /// Create a listing
    Add(ListingArgs),

    /// Change fields of an existing listing
    Update {
        food_id: i64,

        #[command(flatten)]
        fields: ListingArgs,
    },

    /// Delete a listing that has no claims
    Delete { food_id: i64 },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    provider_id: Option<i64>,

    #[arg(long)]
    food_type: Option<String>,

    #[arg(long)]
    meal_type: Option<String>,
}

#[derive(Args, Debug, Default)]
struct ListingArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    quantity: Option<i64>,

    /// Expiry date as YYYY-MM-DD
    #[arg(long)]
    expiry: Option<NaiveDate>,

    #[arg(long)]
    provider_id: Option<i64>,

    #[arg(long)]
    provider_type: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    food_type: Option<String>,

    #[arg(long)]
    meal_type: Option<String>,
}

impl ListingsCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        match self.subcommand {
            ListingsSubcommand::List(filter) => list(db, filter),
            ListingsSubcommand::Options => options(db),
            ListingsSubcommand::Add(fields) => add(db, fields),
            ListingsSubcommand::Update { food_id, fields } => update(db, food_id, fields),
            ListingsSubcommand::Delete { food_id } => {
                db.listings().delete(food_id)?;
                theme::success(format!("Deleted listing #{food_id}"));
                Ok(())
            }
        }
    }
}

fn list(db: &Db, args: FilterArgs) -> Result<()> {
    let filter = ListingFilter {
        location: args.location,
        provider_id: args.provider_id,
        food_type: args.food_type,
        meal_type: args.meal_type,
    };
    let results = db.listings().filter(&filter)?;

    theme::heading("Food Listings");
    if results.is_empty() {
        theme::note("No listings match these filters.");
    } else {
        print!("{}", table::render(&results));
        println!();
        theme::note(format!("{} listing(s)", results.len()));
    }
    println!();
    Ok(())
}

fn options(db: &Db) -> Result<()> {
    let options = db.listings().filter_options()?;

    theme::heading("Filter Options");
    print_values("Locations", &options.locations);
    let providers: Vec<String> = options
        .providers
        .iter()
        .map(|(id, name)| format!("{name} (#{id})"))
        .collect();
    print_values("Providers", &providers);
    print_values("Provider types", &options.provider_types);
    print_values("Food types", &options.food_types);
    print_values("Meal types", &options.meal_types);
    Ok(())
}

fn print_values(label: &str, values: &[String]) {
    println!("  {}", style(label).bold());
    for value in values {
        println!("    {value}");
    }
    println!();
}

fn add(db: &Db, args: ListingArgs) -> Result<()> {
    let Some(food_name) = args.name.clone() else {
        bail!("--name is required when adding a listing");
    };
    let listing = args.apply(NewFoodListing {
        food_name,
        quantity: 0,
        expiry_date: None,
        provider_id: None,
        provider_type: None,
        location: None,
        food_type: None,
        meal_type: None,
    });

    let created = db.listings().insert(&listing)?;
    theme::success(format!(
        "Created listing #{}: {}",
        created.food_id, created.food_name
    ));
    Ok(())
}

fn update(db: &Db, food_id: i64, args: ListingArgs) -> Result<()> {
    let existing = db
        .listings()
        .get(food_id)?
        .with_context(|| format!("listing #{food_id} does not exist"))?;

    let updated = db
        .listings()
        .update(food_id, &args.apply(existing.into_new()))?;
    theme::success(format!(
        "Updated listing #{}: {}",
        updated.food_id, updated.food_name
    ));
    Ok(())
}

impl ListingArgs {
    /// Overwrites the fields given on the command line
    fn apply(self, mut listing: NewFoodListing) -> NewFoodListing {
        if let Some(name) = self.name {
            listing.food_name = name;
        }
        if let Some(quantity) = self.quantity {
            listing.quantity = quantity;
        }
        overwrite(&mut listing.expiry_date, self.expiry.map(Expiry::Date));
        overwrite(&mut listing.provider_id, self.provider_id);
        overwrite(&mut listing.provider_type, self.provider_type);
        overwrite(&mut listing.location, self.location);
        overwrite(&mut listing.food_type, self.food_type);
        overwrite(&mut listing.meal_type, self.meal_type);
        listing
    }
}
