//! Typed create/read/update/delete access to each table.
//!
//! Writes that depend on other rows (a claim needs its listing and receiver)
//! check those rows inside the same transaction as the write.

mod claims;
pub use claims::{ClaimSummary, ClaimableListing, Claims};

mod listings;
pub use listings::{FilterOptions, ListingFilter, Listings};

mod providers;
pub use providers::Providers;

mod receivers;
pub use receivers::Receivers;

use crate::db::Transaction;

use foodshare_core::{schema::Table, Error, Result};

/// Fails unless `table` has a row whose primary key is `key`.
fn ensure_exists(
    tx: &mut Transaction,
    column: &'static str,
    table: &'static Table,
    key: i64,
) -> Result<()> {
    let sql = format!(
        "SELECT 1 FROM {} WHERE {} = ?1",
        table.name,
        table.primary_key().name
    );
    if tx.query(&sql, &[key.into()])?.is_empty() {
        return Err(Error::missing_reference(column, table.name, key));
    }
    Ok(())
}

/// Trims an optional text field, mapping blank strings to `None`.
fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Like [`clean`], also title-casing the result. Used for city names.
fn clean_city(value: &Option<String>) -> Option<String> {
    clean(value).map(|city| crate::loader::normalize::title_case(&city))
}
