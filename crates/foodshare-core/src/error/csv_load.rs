use super::Error;
use std::path::{Path, PathBuf};

/// Error when a CSV file cannot be loaded into its table.
#[derive(Debug)]
pub(super) struct CsvLoadError {
    path: PathBuf,
    cause: Cause,
}

#[derive(Debug)]
enum Cause {
    NotFound,
    MissingColumn(Box<str>),
    Read(Box<dyn std::error::Error + Send + Sync>),
}

impl std::error::Error for CsvLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Cause::Read(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for CsvLoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let path = self.path.display();
        match &self.cause {
            Cause::NotFound => write!(f, "CSV not found: {path}"),
            Cause::MissingColumn(column) => {
                write!(f, "CSV {path} has no `{column}` column")
            }
            Cause::Read(err) => write!(f, "failed to read CSV {path}: {err}"),
        }
    }
}

impl Error {
    pub fn csv_not_found(path: &Path) -> Error {
        Error::csv_load(path, Cause::NotFound)
    }

    pub fn csv_missing_column(path: &Path, column: &str) -> Error {
        Error::csv_load(path, Cause::MissingColumn(column.into()))
    }

    pub fn csv_read(path: &Path, err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::csv_load(path, Cause::Read(Box::new(err)))
    }

    fn csv_load(path: &Path, cause: Cause) -> Error {
        Error::from(super::ErrorKind::CsvLoad(CsvLoadError {
            path: path.to_path_buf(),
            cause,
        }))
    }

    /// Returns `true` if this error came from loading a CSV file.
    pub fn is_csv_load(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::CsvLoad(_)))
    }
}
