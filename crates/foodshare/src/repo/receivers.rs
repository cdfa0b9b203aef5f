use super::{clean, clean_city};
use crate::Db;

use foodshare_core::{
    record::{NewReceiver, Receiver},
    Error, Result,
};

/// Access to the `receivers` table.
#[derive(Debug, Clone, Copy)]
pub struct Receivers<'a> {
    db: &'a Db,
}

impl<'a> Receivers<'a> {
    pub(crate) fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// All receivers, ordered by name.
    pub fn all(&self) -> Result<Vec<Receiver>> {
        self.db
            .query("SELECT * FROM receivers ORDER BY name, receiver_id", &[])?
            .map_rows(Receiver::from_row)
    }

    pub fn get(&self, receiver_id: i64) -> Result<Option<Receiver>> {
        self.db
            .query(
                "SELECT * FROM receivers WHERE receiver_id = ?1",
                &[receiver_id.into()],
            )?
            .first()
            .map(Receiver::from_row)
            .transpose()
    }

    pub fn insert(&self, receiver: &NewReceiver) -> Result<Receiver> {
        let receiver = normalize(receiver);
        receiver.validate()?;

        let receiver_id = self.db.transaction(|tx| {
            tx.execute(
                "INSERT INTO receivers (name, type, city, contact) VALUES (?1, ?2, ?3, ?4)",
                &receiver.params(),
            )?;
            Ok(tx.last_insert_id())
        })?;

        log::info!("created receiver #{receiver_id}");
        self.fetch(receiver_id)
    }

    pub fn update(&self, receiver_id: i64, receiver: &NewReceiver) -> Result<Receiver> {
        let receiver = normalize(receiver);
        receiver.validate()?;

        let mut params = receiver.params();
        params.push(receiver_id.into());

        self.db.transaction(|tx| {
            let count = tx.execute(
                "UPDATE receivers SET name = ?1, type = ?2, city = ?3, contact = ?4 \
                 WHERE receiver_id = ?5",
                &params,
            )?;
            if count == 0 {
                return Err(Error::record_not_found("receivers", receiver_id));
            }
            Ok(())
        })?;

        self.fetch(receiver_id)
    }

    fn fetch(&self, receiver_id: i64) -> Result<Receiver> {
        self.get(receiver_id)?
            .ok_or_else(|| Error::record_not_found("receivers", receiver_id))
    }
}

fn normalize(receiver: &NewReceiver) -> NewReceiver {
    NewReceiver {
        name: receiver.name.trim().to_string(),
        kind: clean(&receiver.kind),
        city: clean_city(&receiver.city),
        contact: clean(&receiver.contact),
    }
}
