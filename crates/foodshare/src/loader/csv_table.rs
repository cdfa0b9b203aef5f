use super::normalize;

use foodshare_core::{err, schema::Table, Error, Result, Value};
use std::path::Path;

/// A CSV file parsed into rows matching a table's column order.
#[derive(Debug)]
pub(super) struct CsvTable {
    pub(super) rows: Vec<Vec<Value>>,
}

impl CsvTable {
    pub(super) fn read(table: &Table, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::csv_not_found(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|err| Error::csv_read(path, err))?;

        let headers = reader
            .headers()
            .map_err(|err| Error::csv_read(path, err))?
            .iter()
            .map(normalize::header)
            .collect::<Vec<_>>();

        let positions = table
            .columns
            .iter()
            .map(|column| {
                let position = headers.iter().position(|h| h == column.name);
                if position.is_none() && !column.nullable && !column.primary_key {
                    return Err(Error::csv_missing_column(path, column.name));
                }
                Ok(position)
            })
            .collect::<Result<Vec<_>>>()?;

        for header in &headers {
            if table.column(header).is_none() {
                log::warn!(
                    "{}: ignoring column `{header}` not present in {}",
                    path.display(),
                    table.name
                );
            }
        }

        let mut rows = vec![];

        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|err| Error::csv_read(path, err))?;
            let line = index + 2;

            let row = table
                .columns
                .iter()
                .zip(&positions)
                .map(|(column, position)| {
                    let raw = position.and_then(|i| record.get(i)).unwrap_or("");
                    normalize::cell(column, raw).map_err(|e| {
                        e.context(err!("{}: row {line}", path.display()))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            rows.push(row);
        }

        Ok(Self { rows })
    }
}
