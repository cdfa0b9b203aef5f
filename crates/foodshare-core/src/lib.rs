pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::Error;

pub mod record;

pub mod schema;
pub use schema::Schema;

pub mod table;
pub use table::{ResultTable, Row};

pub mod value;
pub use value::{FromValue, Value};

/// A Result type alias that uses Foodshare's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
