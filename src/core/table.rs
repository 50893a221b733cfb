use crate::error::ConvertError;

/// A row of cells, one per header column.
pub type Row = Vec<String>;

/// An ordered header plus ordered rows of text cells.
///
/// Every row holds exactly [`Table::column_count`] cells. Short rows are padded
/// with empty cells when the table is built, and rows longer than the header are
/// rejected. Header names may repeat. Row order is kept exactly as given.
///
/// A `Table` has no mutators: readers build it once and writers only borrow it.
///
/// # Examples
///
/// ```
/// use outputty::core::table::Table;
///
/// let table = Table::new(
///     vec!["name".to_string(), "city".to_string()],
///     vec![vec!["alice".to_string()]],
/// )
/// .unwrap();
///
/// assert_eq!(table.rows()[0], vec!["alice".to_string(), String::new()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table, padding short rows with empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MalformedRow`] for the first row with more cells
    /// than there are headers. `record` counts the header as record 1.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Result<Self, ConvertError> {
        let expected = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| normalize(row, expected, index + 2))
            .collect::<Result<Vec<Row>, ConvertError>>()?;

        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows, header excluded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize(mut row: Row, expected: usize, record: usize) -> Result<Row, ConvertError> {
    if row.len() > expected {
        return Err(ConvertError::MalformedRow {
            record,
            expected,
            found: row.len(),
        });
    }
    row.resize(expected, String::new());
    Ok(row)
}
