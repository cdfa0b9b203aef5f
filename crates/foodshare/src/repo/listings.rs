use super::{clean, clean_city, ensure_exists};
use crate::Db;

use foodshare_core::{
    record::{FoodListing, NewFoodListing},
    schema, Error, Result, ResultTable, Value,
};
use std::sync::Arc;

const LISTING_COLUMNS: &str =
    "food_name, quantity, expiry_date, provider_id, provider_type, location, food_type, meal_type";

/// Narrows the listing browser. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub location: Option<String>,
    pub provider_id: Option<i64>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
}

impl ListingFilter {
    /// The browse statement and its parameters.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = String::from(
            "SELECT f.*, p.name AS provider_name, p.contact AS provider_contact \
             FROM food_listings f LEFT JOIN providers p ON p.provider_id = f.provider_id",
        );
        let mut clauses = vec![];
        let mut params = vec![];

        if let Some(location) = &self.location {
            params.push(location.into());
            clauses.push(format!("f.location = ?{}", params.len()));
        }
        if let Some(provider_id) = self.provider_id {
            params.push(provider_id.into());
            clauses.push(format!("f.provider_id = ?{}", params.len()));
        }
        if let Some(food_type) = &self.food_type {
            params.push(food_type.into());
            clauses.push(format!("f.food_type = ?{}", params.len()));
        }
        if let Some(meal_type) = &self.meal_type {
            params.push(meal_type.into());
            clauses.push(format!("f.meal_type = ?{}", params.len()));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        (sql, params)
    }
}

/// Values offered for each filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    /// `(provider_id, name)` ordered by name
    pub providers: Vec<(i64, String)>,
    pub provider_types: Vec<String>,
    pub food_types: Vec<String>,
    pub meal_types: Vec<String>,
}

/// Access to the `food_listings` table.
#[derive(Debug, Clone, Copy)]
pub struct Listings<'a> {
    db: &'a Db,
}

impl<'a> Listings<'a> {
    pub(crate) fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn all(&self) -> Result<Vec<FoodListing>> {
        self.db
            .query("SELECT * FROM food_listings ORDER BY food_id", &[])?
            .map_rows(FoodListing::from_row)
    }

    pub fn get(&self, food_id: i64) -> Result<Option<FoodListing>> {
        self.db
            .query(
                "SELECT * FROM food_listings WHERE food_id = ?1",
                &[food_id.into()],
            )?
            .first()
            .map(FoodListing::from_row)
            .transpose()
    }

    /// Listings joined with their provider's name and contact.
    pub fn filter(&self, filter: &ListingFilter) -> Result<Arc<ResultTable>> {
        let (sql, params) = filter.to_sql();
        self.db.query(&sql, &params)
    }

    pub fn filter_options(&self) -> Result<FilterOptions> {
        let providers = self
            .db
            .query("SELECT provider_id, name FROM providers ORDER BY name", &[])?
            .map_rows(|row| Ok((row.get("provider_id")?, row.get("name")?)))?;

        Ok(FilterOptions {
            locations: self.distinct("location")?,
            providers,
            provider_types: self.distinct("provider_type")?,
            food_types: self.distinct("food_type")?,
            meal_types: self.distinct("meal_type")?,
        })
    }

    pub fn insert(&self, listing: &NewFoodListing) -> Result<FoodListing> {
        let listing = normalize(listing);
        listing.validate()?;

        let food_id = self.db.transaction(|tx| {
            if let Some(provider_id) = listing.provider_id {
                ensure_exists(tx, "food_listings.provider_id", &schema::PROVIDERS, provider_id)?;
            }

            tx.execute(
                &format!(
                    "INSERT INTO food_listings ({LISTING_COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                &listing.params(),
            )?;
            Ok(tx.last_insert_id())
        })?;

        log::info!("created listing #{food_id}");
        self.fetch(food_id)
    }

    pub fn update(&self, food_id: i64, listing: &NewFoodListing) -> Result<FoodListing> {
        let listing = normalize(listing);
        listing.validate()?;

        let mut params = listing.params();
        params.push(food_id.into());

        self.db.transaction(|tx| {
            if let Some(provider_id) = listing.provider_id {
                ensure_exists(tx, "food_listings.provider_id", &schema::PROVIDERS, provider_id)?;
            }

            let count = tx.execute(
                "UPDATE food_listings SET food_name = ?1, quantity = ?2, expiry_date = ?3, \
                 provider_id = ?4, provider_type = ?5, location = ?6, food_type = ?7, \
                 meal_type = ?8 WHERE food_id = ?9",
                &params,
            )?;
            if count == 0 {
                return Err(Error::record_not_found("food_listings", food_id));
            }
            Ok(())
        })?;

        self.fetch(food_id)
    }

    /// Deletes a listing. Fails while any claim still references it.
    pub fn delete(&self, food_id: i64) -> Result<()> {
        self.db.transaction(|tx| {
            let claims = tx
                .query(
                    "SELECT COUNT(*) AS n FROM claims WHERE food_id = ?1",
                    &[food_id.into()],
                )?
                .first()
                .map(|row| row.get::<i64>("n"))
                .transpose()?
                .unwrap_or(0);

            if claims > 0 {
                return Err(Error::still_referenced("food_listings", food_id, "claims", claims));
            }

            let count = tx.execute(
                "DELETE FROM food_listings WHERE food_id = ?1",
                &[food_id.into()],
            )?;
            if count == 0 {
                return Err(Error::record_not_found("food_listings", food_id));
            }
            Ok(())
        })?;

        log::info!("deleted listing #{food_id}");
        Ok(())
    }

    fn distinct(&self, column: &str) -> Result<Vec<String>> {
        self.db
            .query(
                &format!(
                    "SELECT DISTINCT {column} AS value FROM food_listings \
                     WHERE {column} IS NOT NULL ORDER BY {column}"
                ),
                &[],
            )?
            .map_rows(|row| row.get("value"))
    }

    fn fetch(&self, food_id: i64) -> Result<FoodListing> {
        self.get(food_id)?
            .ok_or_else(|| Error::record_not_found("food_listings", food_id))
    }
}

fn normalize(listing: &NewFoodListing) -> NewFoodListing {
    NewFoodListing {
        food_name: listing.food_name.trim().to_string(),
        quantity: listing.quantity,
        expiry_date: listing.expiry_date.clone(),
        provider_id: listing.provider_id,
        provider_type: clean(&listing.provider_type),
        location: clean_city(&listing.location),
        food_type: clean(&listing.food_type),
        meal_type: clean(&listing.meal_type),
    }
}
