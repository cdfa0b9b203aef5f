//! Typed rows of the four tables.

use crate::{Error, FromValue, Result, Row, Value};

use chrono::NaiveDate;
use std::{fmt, str::FromStr};

/// Lifecycle status of a claim.
///
/// Parsing with [`FromStr`] accepts only the three known statuses. Rows read
/// back from the database use [`ClaimStatus::from_stored`], which keeps any
/// other text as [`ClaimStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    Pending,
    Completed,
    Cancelled,
    /// A status outside the known lifecycle, as stored.
    Other(String),
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [Self::Pending, Self::Completed, Self::Cancelled];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Other(status) => status,
        }
    }

    /// Reads a stored status, matching the known ones case-insensitively.
    pub fn from_stored(s: &str) -> ClaimStatus {
        s.parse()
            .unwrap_or_else(|_| ClaimStatus::Other(s.trim().to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::unknown_status(s))
    }
}

impl From<ClaimStatus> for Value {
    fn from(src: ClaimStatus) -> Self {
        match src {
            ClaimStatus::Other(status) => Value::Text(status),
            known => Value::Text(known.as_str().to_string()),
        }
    }
}

impl FromValue for ClaimStatus {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Text(text) => Ok(ClaimStatus::from_stored(text)),
            _ => Err(Error::type_conversion(value.clone(), "ClaimStatus")),
        }
    }
}

/// When a listing expires.
///
/// The loader keeps expiry dates it cannot read verbatim; those come back
/// as [`Expiry::Unparsed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expiry {
    Date(NaiveDate),
    Unparsed(String),
}

impl Expiry {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Unparsed(_) => None,
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unparsed(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDate> for Expiry {
    fn from(src: NaiveDate) -> Self {
        Self::Date(src)
    }
}

impl From<Expiry> for Value {
    fn from(src: Expiry) -> Self {
        match src {
            Expiry::Date(date) => date.into(),
            Expiry::Unparsed(text) => Value::Text(text),
        }
    }
}

impl FromValue for Expiry {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Text(text) => Ok(NaiveDate::from_value(value)
                .map(Expiry::Date)
                .unwrap_or_else(|_| Expiry::Unparsed(text.clone()))),
            _ => Err(Error::type_conversion(value.clone(), "Expiry")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub provider_id: i64,
    pub name: String,
    pub kind: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewProvider {
    pub name: String,
    pub kind: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub receiver_id: i64,
    pub name: String,
    pub kind: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewReceiver {
    pub name: String,
    pub kind: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodListing {
    pub food_id: i64,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<Expiry>,
    pub provider_id: Option<i64>,
    pub provider_type: Option<String>,
    pub location: Option<String>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodListing {
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<Expiry>,
    pub provider_id: Option<i64>,
    pub provider_type: Option<String>,
    pub location: Option<String>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub claim_id: i64,
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: Option<ClaimStatus>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: Option<ClaimStatus>,
    pub timestamp: Option<String>,
}

impl Provider {
    pub fn from_row(row: Row<'_>) -> Result<Self> {
        Ok(Self {
            provider_id: row.get("provider_id")?,
            name: row.get("name")?,
            kind: row.get("type")?,
            address: row.get("address")?,
            city: row.get("city")?,
            contact: row.get("contact")?,
        })
    }

    /// The editable fields, for building an update.
    pub fn into_new(self) -> NewProvider {
        NewProvider {
            name: self.name,
            kind: self.kind,
            address: self.address,
            city: self.city,
            contact: self.contact,
        }
    }
}

impl NewProvider {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)
    }

    pub fn params(&self) -> Vec<Value> {
        vec![
            self.name.as_str().into(),
            self.kind.clone().into(),
            self.address.clone().into(),
            self.city.clone().into(),
            self.contact.clone().into(),
        ]
    }
}

impl Receiver {
    pub fn from_row(row: Row<'_>) -> Result<Self> {
        Ok(Self {
            receiver_id: row.get("receiver_id")?,
            name: row.get("name")?,
            kind: row.get("type")?,
            city: row.get("city")?,
            contact: row.get("contact")?,
        })
    }

    pub fn into_new(self) -> NewReceiver {
        NewReceiver {
            name: self.name,
            kind: self.kind,
            city: self.city,
            contact: self.contact,
        }
    }
}

impl NewReceiver {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)
    }

    pub fn params(&self) -> Vec<Value> {
        vec![
            self.name.as_str().into(),
            self.kind.clone().into(),
            self.city.clone().into(),
            self.contact.clone().into(),
        ]
    }
}

impl FoodListing {
    pub fn from_row(row: Row<'_>) -> Result<Self> {
        Ok(Self {
            food_id: row.get("food_id")?,
            food_name: row.get("food_name")?,
            quantity: row.get::<Option<i64>>("quantity")?.unwrap_or(0),
            expiry_date: row.get("expiry_date")?,
            provider_id: row.get("provider_id")?,
            provider_type: row.get("provider_type")?,
            location: row.get("location")?,
            food_type: row.get("food_type")?,
            meal_type: row.get("meal_type")?,
        })
    }

    pub fn into_new(self) -> NewFoodListing {
        NewFoodListing {
            food_name: self.food_name,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            provider_id: self.provider_id,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type,
            meal_type: self.meal_type,
        }
    }
}

impl NewFoodListing {
    pub fn validate(&self) -> Result<()> {
        require_text("food_name", &self.food_name)?;
        if self.quantity < 0 {
            return Err(Error::negative_quantity(self.quantity));
        }
        Ok(())
    }

    pub fn params(&self) -> Vec<Value> {
        vec![
            self.food_name.as_str().into(),
            self.quantity.into(),
            self.expiry_date.clone().into(),
            self.provider_id.into(),
            self.provider_type.clone().into(),
            self.location.clone().into(),
            self.food_type.clone().into(),
            self.meal_type.clone().into(),
        ]
    }
}

impl Claim {
    pub fn from_row(row: Row<'_>) -> Result<Self> {
        Ok(Self {
            claim_id: row.get("claim_id")?,
            food_id: row.get("food_id")?,
            receiver_id: row.get("receiver_id")?,
            status: row.get("status")?,
            timestamp: row.get("timestamp")?,
        })
    }

    pub fn into_new(self) -> NewClaim {
        NewClaim {
            food_id: self.food_id,
            receiver_id: self.receiver_id,
            status: self.status,
            timestamp: self.timestamp,
        }
    }
}

impl NewClaim {
    /// Only the known statuses may be written.
    pub fn validate(&self) -> Result<()> {
        match &self.status {
            Some(ClaimStatus::Other(status)) => Err(Error::unknown_status(status)),
            _ => Ok(()),
        }
    }

    pub fn params(&self) -> Vec<Value> {
        vec![
            self.food_id.into(),
            self.receiver_id.into(),
            self.status.clone().into(),
            self.timestamp.clone().into(),
        ]
    }
}

fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::empty_field(field));
    }
    Ok(())
}
