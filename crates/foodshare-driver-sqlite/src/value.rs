use foodshare_core::Value as CoreValue;
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

/// Borrowed parameter binding for a core value.
#[derive(Debug)]
pub(crate) struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

impl Value<'_> {
    /// Converts a SQLite value within a row to a core value.
    pub(crate) fn from_sql(value: ValueRef<'_>) -> CoreValue {
        match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(v) => CoreValue::Integer(v),
            ValueRef::Real(v) => CoreValue::Real(v),
            ValueRef::Text(v) => CoreValue::Text(String::from_utf8_lossy(v).into_owned()),
            ValueRef::Blob(v) => CoreValue::Blob(v.to_vec()),
        }
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            CoreValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            CoreValue::Integer(v) => ToSqlOutput::Borrowed(ValueRef::Integer(*v)),
            CoreValue::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
            CoreValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            CoreValue::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
        })
    }
}
