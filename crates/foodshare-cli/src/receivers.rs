use crate::{overwrite, table, theme};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use foodshare::{Db, NewReceiver};

#[derive(Parser, Debug)]
pub struct ReceiversCommand {
    #[command(subcommand)]
    subcommand: ReceiversSubcommand,
}

#[derive(Parser, Debug)]
enum ReceiversSubcommand {
    /// Show all receivers
    List,

    /// Register a receiver
    Add(ReceiverArgs),

    /// Change fields of an existing receiver
    Update {
        receiver_id: i64,

        #[command(flatten)]
        fields: ReceiverArgs,
    },
}

#[derive(Args, Debug)]
struct ReceiverArgs {
    #[arg(long)]
    name: Option<String>,

    /// NGO, Shelter, Charity, Individual, ...
    #[arg(long = "type")]
    kind: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    contact: Option<String>,
}

impl ReceiversCommand {
    pub(crate) fn run(self, db: &Db) -> Result<()> {
        match self.subcommand {
            ReceiversSubcommand::List => {
                let receivers = db.query("SELECT * FROM receivers ORDER BY name", &[])?;
                theme::heading("Receivers");
                print!("{}", table::render(&receivers));
                println!();
                Ok(())
            }
            ReceiversSubcommand::Add(fields) => {
                let Some(name) = fields.name.clone() else {
                    bail!("--name is required when adding a receiver");
                };
                let receiver = db.receivers().insert(&fields.apply(NewReceiver {
                    name,
                    ..NewReceiver::default()
                }))?;
                theme::success(format!(
                    "Created receiver #{}: {}",
                    receiver.receiver_id, receiver.name
                ));
                Ok(())
            }
            ReceiversSubcommand::Update {
                receiver_id,
                fields,
            } => {
                let existing = db
                    .receivers()
                    .get(receiver_id)?
                    .with_context(|| format!("receiver #{receiver_id} does not exist"))?;
                let receiver = db
                    .receivers()
                    .update(receiver_id, &fields.apply(existing.into_new()))?;
                theme::success(format!(
                    "Updated receiver #{}: {}",
                    receiver.receiver_id, receiver.name
                ));
                Ok(())
            }
        }
    }
}

impl ReceiverArgs {
    fn apply(self, mut receiver: NewReceiver) -> NewReceiver {
        if let Some(name) = self.name {
            receiver.name = name;
        }
        overwrite(&mut receiver.kind, self.kind);
        overwrite(&mut receiver.city, self.city);
        overwrite(&mut receiver.contact, self.contact);
        receiver
    }
}
