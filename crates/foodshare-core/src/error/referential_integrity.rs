use super::Error;

/// Error when a write would break a reference between tables.
#[derive(Debug)]
pub(super) enum ReferentialIntegrityError {
    /// A foreign key column points at a row that does not exist.
    MissingTarget {
        column: &'static str,
        target: &'static str,
        key: i64,
    },

    /// A row cannot be deleted while other rows still point at it.
    StillReferenced {
        table: &'static str,
        key: i64,
        referenced_by: &'static str,
        count: i64,
    },
}

impl std::error::Error for ReferentialIntegrityError {}

impl core::fmt::Display for ReferentialIntegrityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ReferentialIntegrityError::MissingTarget {
                column,
                target,
                key,
            } => write!(f, "{column} = {key} does not reference any row in {target}"),
            ReferentialIntegrityError::StillReferenced {
                table,
                key,
                referenced_by,
                count,
            } => write!(
                f,
                "{table} #{key} is still referenced by {count} row(s) in {referenced_by}"
            ),
        }
    }
}

impl Error {
    /// Creates an error for a foreign key value with no matching row.
    pub fn missing_reference(column: &'static str, target: &'static str, key: i64) -> Error {
        Error::from(super::ErrorKind::ReferentialIntegrity(
            ReferentialIntegrityError::MissingTarget {
                column,
                target,
                key,
            },
        ))
    }

    /// Creates an error for a delete blocked by dependent rows.
    pub fn still_referenced(
        table: &'static str,
        key: i64,
        referenced_by: &'static str,
        count: i64,
    ) -> Error {
        Error::from(super::ErrorKind::ReferentialIntegrity(
            ReferentialIntegrityError::StillReferenced {
                table,
                key,
                referenced_by,
                count,
            },
        ))
    }

    /// Returns `true` if this error is a referential integrity error.
    pub fn is_referential_integrity(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ReferentialIntegrity(_)))
    }
}
