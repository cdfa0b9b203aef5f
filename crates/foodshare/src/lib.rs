pub mod analytics;
pub use analytics::Report;

pub mod chart;

pub mod db;
pub use db::Db;

pub mod loader;
pub use loader::{CsvSources, LoadReport, Loader, MissingCsv};

pub mod repo;

pub mod scorer;

pub use foodshare_core::{
    bail, driver, err,
    record::{
        Claim, ClaimStatus, Expiry, FoodListing, NewClaim, NewFoodListing, NewProvider, NewReceiver,
        Provider, Receiver,
    },
    schema, Error, FromValue, Result, ResultTable, Row, Value,
};

#[cfg(feature = "sqlite")]
pub use foodshare_driver_sqlite::Sqlite;
