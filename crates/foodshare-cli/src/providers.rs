use crate::{overwrite, table, theme};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use foodshare::{Db, NewProvider};

#[derive(Parser, Debug)]
pub struct ProvidersCommand {
    #[command(subcommand)]
    subcommand: ProvidersSubcommand,
}

#[derive(Parser, Debug)]
enum ProvidersSubcommand {
    /// Show all providers
    List,

    /// Show the cities providers are in
    Cities,

    /// Register a provider
    Add(ProviderArgs),

    /// Change fields of an existing provider
    Update {
        provider_id: i64,

        #[command(flatten)]
        fields: ProviderArgs,
    },
}

#[derive(Args, Debug)]
struct ProviderArgs {
    #[arg(long)]
    name: Option<String>,

    /// Restaurant, Grocery Store, Supermarket, ...
    #[arg(long = "type")]
    kind: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    contact: Option<String>,
}

impl ProvidersCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        match self.subcommand {
            ProvidersSubcommand::List => {
                let providers = db.query("SELECT * FROM providers ORDER BY name", &[])?;
                theme::heading("Providers");
                print!("{}", table::render(&providers));
                println!();
                Ok(())
            }
            ProvidersSubcommand::Cities => {
                theme::heading("Provider Cities");
                for city in db.providers().cities()? {
                    println!("  {city}");
                }
                println!();
                Ok(())
            }
            ProvidersSubcommand::Add(fields) => {
                let Some(name) = fields.name.clone() else {
                    bail!("--name is required when adding a provider");
                };
                let provider = db.providers().insert(&fields.apply(NewProvider {
                    name,
                    ..NewProvider::default()
                }))?;
                theme::success(format!(
                    "Created provider #{}: {}",
                    provider.provider_id, provider.name
                ));
                Ok(())
            }
            ProvidersSubcommand::Update {
                provider_id,
                fields,
            } => {
                let existing = db
                    .providers()
                    .get(provider_id)?
                    .with_context(|| format!("provider #{provider_id} does not exist"))?;
                let provider = db
                    .providers()
                    .update(provider_id, &fields.apply(existing.into_new()))?;
                theme::success(format!(
                    "Updated provider #{}: {}",
                    provider.provider_id, provider.name
                ));
                Ok(())
            }
        }
    }
}

impl ProviderArgs {
    fn apply(self, mut provider: NewProvider) -> NewProvider {
        if let Some(name) = self.name {
            provider.name = name;
        }
        overwrite(&mut provider.kind, self.kind);
        overwrite(&mut provider.address, self.address);
        overwrite(&mut provider.city, self.city);
        overwrite(&mut provider.contact, self.contact);
        provider
    }
}
