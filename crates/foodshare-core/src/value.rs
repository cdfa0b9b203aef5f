use crate::{Error, Result};

use chrono::NaiveDate;

/// A single SQL value, as bound to a statement parameter or read from a row.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Signed 64-bit integer
    Integer(i64),

    /// 64-bit float
    Real(f64),

    /// UTF-8 text
    Text(String),

    /// Raw bytes
    Blob(Vec<u8>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the storage class, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Integer(v) => Some(v as f64),
            Self::Real(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::Integer(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::Integer(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::Real(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::Text(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::Text(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::Text(src.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(src: NaiveDate) -> Self {
        Self::Text(src.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Conversion from a borrowed [`Value`] into a Rust type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(*v),
            // CSV-sourced columns can hold whole numbers as REAL
            Value::Real(v) if v.fract() == 0.0 => Ok(*v as i64),
            Value::Text(v) => v
                .trim()
                .parse()
                .map_err(|_| Error::type_conversion(value.clone(), "i64")),
            _ => Err(Error::type_conversion(value.clone(), "i64")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::type_conversion(value.clone(), "f64"))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            Value::Integer(_) | Value::Real(_) => Ok(value.to_string()),
            _ => Err(Error::type_conversion(value.clone(), "String")),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: &Value) -> Result<Self> {
        let text = value
            .as_str()
            .ok_or_else(|| Error::type_conversion(value.clone(), "NaiveDate"))?;

        // Accept a trailing time component, as produced by some exports
        let date = text.get(..10).unwrap_or(text);
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| Error::type_conversion(value.clone(), "NaiveDate"))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            _ => T::from_value(value).map(Some),
        }
    }
}
