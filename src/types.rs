use chrono::{NaiveDate, NaiveTime};

//==============================================================================
// Cell values
//==============================================================================

/// A single spreadsheet cell after parsing.
///
/// The column set of a [`Table`] is uniform, but cell types within a column
/// are not guaranteed: the upstream sheet is hand-edited and its schema is
/// not stable. Everything downstream (filtering, counting, serializing)
/// treats cells individually and degrades to [`CellValue::Null`] rather
/// than erroring.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Bool(bool),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Date component of the cell, if it has one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// String rendering used for equality matching and the unique-values
    /// listing. `None` for nulls, which never match anything.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            CellValue::Time(t) => Some(t.format("%H:%M:%S").to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Null => None,
        }
    }

    /// Trimmed, case-folded rendering for label comparison.
    pub fn fold_key(&self) -> Option<String> {
        self.to_text().map(|s| s.trim().to_lowercase())
    }
}

//==============================================================================
// Table
//==============================================================================

/// The parsed spreadsheet: an ordered column set from the header row and
/// row-major cells. Row order is preserved from the source file through
/// every operation; filters produce new tables and never reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding missing cells with nulls and dropping any
    /// surplus so every row matches the header width.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        &self.rows[row][col]
    }

    /// New table holding the rows for which `keep` returns true, in their
    /// original order. The input table is untouched.
    pub fn retain_rows<F>(&self, keep: F) -> Table
    where
        F: Fn(&[CellValue]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| keep(r.as_slice()))
                .cloned()
                .collect(),
        }
    }
}
