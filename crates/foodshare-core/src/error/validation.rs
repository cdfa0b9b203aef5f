use super::Error;

/// Error when a value fails validation before it reaches the database.
#[derive(Debug)]
pub(super) struct ValidationError {
    kind: ValidationErrorKind,
}

#[derive(Debug)]
enum ValidationErrorKind {
    /// A quantity below zero
    NegativeQuantity { value: i64 },

    /// A required text field that is empty after trimming
    EmptyField { field: &'static str },

    /// A claim status outside Pending / Completed / Cancelled
    UnknownStatus { value: Box<str> },

    /// A statement passed to `query` that would modify the database
    NotReadOnly { sql: Box<str> },

    /// A report called with the wrong number of parameters
    ReportParameter {
        report: &'static str,
        expected: Option<&'static str>,
    },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ValidationErrorKind::NegativeQuantity { value } => {
                write!(f, "quantity must be non-negative (got {value})")
            }
            ValidationErrorKind::EmptyField { field } => write!(f, "{field} must not be empty"),
            ValidationErrorKind::UnknownStatus { value } => write!(
                f,
                "unknown claim status {value:?} (expected Pending, Completed or Cancelled)"
            ),
            ValidationErrorKind::NotReadOnly { sql } => {
                write!(f, "query requires a read-only statement; sql={sql}")
            }
            ValidationErrorKind::ReportParameter { report, expected } => match expected {
                Some(param) => write!(f, "report `{report}` requires a {param} parameter"),
                None => write!(f, "report `{report}` takes no parameters"),
            },
        }
    }
}

impl Error {
    pub fn negative_quantity(value: i64) -> Error {
        Error::validation(ValidationErrorKind::NegativeQuantity { value })
    }

    pub fn empty_field(field: &'static str) -> Error {
        Error::validation(ValidationErrorKind::EmptyField { field })
    }

    pub fn unknown_status(value: &str) -> Error {
        Error::validation(ValidationErrorKind::UnknownStatus {
            value: value.into(),
        })
    }

    pub fn not_read_only(sql: &str) -> Error {
        Error::validation(ValidationErrorKind::NotReadOnly { sql: sql.into() })
    }

    /// A report was given a parameter it does not take, or is missing the one
    /// it requires (`expected`).
    pub fn report_parameter(report: &'static str, expected: Option<&'static str>) -> Error {
        Error::validation(ValidationErrorKind::ReportParameter { report, expected })
    }

    fn validation(kind: ValidationErrorKind) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError { kind }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}
