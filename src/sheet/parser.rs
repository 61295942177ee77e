//! Workbook parsing - XLSX bytes → [`Table`]

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{DashboardError, DashboardResult};
use crate::types::{CellValue, Table};

/// Parse the first worksheet of an XLSX workbook into a [`Table`].
///
/// Row 0 is the header; blank header cells are named `col_<index>`. Cells
/// in `date_column` (matched trimmed, case-insensitively) are coerced to
/// dates, with unparseable values becoming null rather than errors.
pub fn parse_workbook(bytes: &[u8], date_column: &str) -> DashboardResult<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DashboardError::Sheet("workbook has no sheets".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    parse_range(&range, date_column)
}

fn parse_range(range: &Range<Data>, date_column: &str) -> DashboardResult<Table> {
    let (height, width) = range.get_size();
    if height == 0 {
        return Ok(Table::new(Vec::new()));
    }

    let mut columns: Vec<String> = Vec::with_capacity(width);
    for col in 0..width {
        let name = match range.get((0, col)) {
            Some(Data::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Data::Int(i)) => i.to_string(),
            Some(Data::Float(f)) => f.to_string(),
            _ => format!("col_{}", col),
        };
        columns.push(name);
    }

    let date_col = columns
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case(date_column.trim()));

    let mut table = Table::new(columns);
    for row in 1..height {
        let mut cells = Vec::with_capacity(width);
        for col in 0..width {
            let cell = range
                .get((row, col))
                .map(convert_cell)
                .unwrap_or(CellValue::Null);
            let cell = if Some(col) == date_col {
                coerce_date(cell)
            } else {
                cell
            };
            cells.push(cell);
        }
        table.push_row(cells);
    }

    Ok(table)
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            // Excel serials below 1.0 carry no date component; everything
            // else renders as a calendar date, dropping any time-of-day.
            match dt.as_datetime() {
                Some(naive) if dt.as_f64() < 1.0 => CellValue::Time(naive.time()),
                Some(naive) => CellValue::Date(naive.date()),
                None => CellValue::Null,
            }
        }
        Data::DateTimeIso(s) => convert_iso(s),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

fn convert_iso(value: &str) -> CellValue {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return CellValue::Date(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    if let Ok(t) = NaiveTime::parse_from_str(value, "%H:%M:%S%.f") {
        return CellValue::Time(t);
    }
    CellValue::Null
}

/// Date coercion for the designated date column. Text cells are parsed
/// against the formats the sheet's editors actually use; anything that is
/// not a date and does not parse becomes null.
fn coerce_date(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Date(_) => cell,
        CellValue::Text(s) => parse_date_text(&s)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Null),
        _ => CellValue::Null,
    }
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            return Some(d);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    None
}
