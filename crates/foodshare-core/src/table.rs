use crate::{err, FromValue, Result, Value};

/// Rows returned by a read query.
///
/// Column order and row order are exactly as produced by the storage engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: vec![],
        }
    }

    /// Appends a row. Panics if the row width does not match the column count.
    pub fn push(&mut self, row: Vec<Value>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row width does not match column count; columns={:?}",
            self.columns
        );
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Returns the first row, or `None` when the result is empty.
    pub fn first(&self) -> Option<Row<'_>> {
        self.row(0)
    }

    /// Decodes every row with `f`.
    pub fn map_rows<T>(&self, f: impl FnMut(Row<'_>) -> Result<T>) -> Result<Vec<T>> {
        self.rows().map(f).collect()
    }
}

/// A borrowed view of one row of a [`ResultTable`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Value of the first column called `name`.
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        let index = self.columns.iter().position(|column| column == name)?;
        self.values.get(index)
    }

    /// Decodes the column called `name`.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self
            .value(name)
            .ok_or_else(|| err!("column `{name}` missing from result"))?;
        T::from_value(value).map_err(|e| e.context(format!("decoding column `{name}`")))
    }
}
