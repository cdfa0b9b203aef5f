use super::{clean, clean_city};
use crate::Db;

use foodshare_core::{
    record::{NewProvider, Provider},
    Error, Result,
};

/// Access to the `providers` table.
#[derive(Debug, Clone, Copy)]
pub struct Providers<'a> {
    db: &'a Db,
}

impl<'a> Providers<'a> {
    pub(crate) fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// All providers, ordered by name.
    pub fn all(&self) -> Result<Vec<Provider>> {
        self.db
            .query("SELECT * FROM providers ORDER BY name, provider_id", &[])?
            .map_rows(Provider::from_row)
    }

    pub fn get(&self, provider_id: i64) -> Result<Option<Provider>> {
        self.db
            .query(
                "SELECT * FROM providers WHERE provider_id = ?1",
                &[provider_id.into()],
            )?
            .first()
            .map(Provider::from_row)
            .transpose()
    }

    pub fn insert(&self, provider: &NewProvider) -> Result<Provider> {
        let provider = normalize(provider);
        provider.validate()?;

        let provider_id = self.db.transaction(|tx| {
            tx.execute(
                "INSERT INTO providers (name, type, address, city, contact) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &provider.params(),
            )?;
            Ok(tx.last_insert_id())
        })?;

        log::info!("created provider #{provider_id}");
        self.fetch(provider_id)
    }

    pub fn update(&self, provider_id: i64, provider: &NewProvider) -> Result<Provider> {
        let provider = normalize(provider);
        provider.validate()?;

        let mut params = provider.params();
        params.push(provider_id.into());

        self.db.transaction(|tx| {
            let count = tx.execute(
                "UPDATE providers SET name = ?1, type = ?2, address = ?3, city = ?4, \
                 contact = ?5 WHERE provider_id = ?6",
                &params,
            )?;
            if count == 0 {
                return Err(Error::record_not_found("providers", provider_id));
            }
            Ok(())
        })?;

        self.fetch(provider_id)
    }

    /// Distinct provider cities, sorted.
    pub fn cities(&self) -> Result<Vec<String>> {
        self.db
            .query(
                "SELECT DISTINCT city FROM providers WHERE city IS NOT NULL ORDER BY city",
                &[],
            )?
            .map_rows(|row| row.get("city"))
    }

    fn fetch(&self, provider_id: i64) -> Result<Provider> {
        self.get(provider_id)?
            .ok_or_else(|| Error::record_not_found("providers", provider_id))
    }
}

fn normalize(provider: &NewProvider) -> NewProvider {
    NewProvider {
        name: provider.name.trim().to_string(),
        kind: clean(&provider.kind),
        address: clean(&provider.address),
        city: clean_city(&provider.city),
        contact: clean(&provider.contact),
    }
}
