//! Row filtering by date range and field equality.
//!
//! Both filters are pure: the input table is never mutated and row order
//! is preserved. Unresolvable columns make the corresponding filter a
//! pass-through, never an error.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::core::columns::{self, Matcher};
use crate::error::{DashboardError, DashboardResult};
use crate::types::Table;

//==============================================================================
// Date ranges
//==============================================================================

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Range for a named preset relative to `today`. Accepts both the UI
    /// spellings (`last7`, `thismonth`) and the API ones (`last_7_days`,
    /// `this_month`). Unknown names, including `custom` (which arrives
    /// with explicit start/end), yield `None`.
    pub fn from_preset(name: &str, today: NaiveDate) -> Option<DateRange> {
        match name.trim().to_lowercase().as_str() {
            "today" => Some(Self::single(today)),
            "yesterday" => today.checked_sub_days(Days::new(1)).map(Self::single),
            "tomorrow" => today.checked_add_days(Days::new(1)).map(Self::single),
            "last7" | "last_7_days" => today
                .checked_sub_days(Days::new(6))
                .map(|start| Self::new(start, today)),
            "last30" | "last_30_days" => today
                .checked_sub_days(Days::new(29))
                .map(|start| Self::new(start, today)),
            "next7" => today
                .checked_add_days(Days::new(7))
                .map(|end| Self::new(today, end)),
            "next30" => today
                .checked_add_days(Days::new(30))
                .map(|end| Self::new(today, end)),
            "thisweek" | "this_week" => {
                let monday = today
                    .checked_sub_days(Days::new(today.weekday().num_days_from_monday() as u64))?;
                Some(Self::new(monday, monday.checked_add_days(Days::new(6))?))
            }
            "thismonth" | "this_month" => {
                let first = today.with_day(1)?;
                let last = first
                    .checked_add_months(Months::new(1))?
                    .checked_sub_days(Days::new(1))?;
                Some(Self::new(first, last))
            }
            "thisyear" | "this_year" => Some(Self::new(
                NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(today.year(), 12, 31)?,
            )),
            _ => None,
        }
    }
}

/// Parse a caller-supplied `YYYY-MM-DD` parameter.
pub fn parse_date_param(value: &str) -> DashboardResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        DashboardError::Validation(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            value.trim()
        ))
    })
}

/// Resolve the effective range from request parameters: explicit
/// `start`/`end` override the named preset, and a malformed explicit date
/// is a validation error.
pub fn resolve_range(
    preset: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> DashboardResult<Option<DateRange>> {
    if let (Some(start), Some(end)) = (start, end) {
        return Ok(Some(DateRange::new(
            parse_date_param(start)?,
            parse_date_param(end)?,
        )));
    }
    Ok(preset.and_then(|name| DateRange::from_preset(name, today)))
}

//==============================================================================
// Field filters
//==============================================================================

/// Equality predicate on one resolved column.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: String,
    pub query: String,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            query: query.into(),
        }
    }

    /// `all` and `all_<field>` are the UI's "show all" selections and mean
    /// "no filtering".
    pub fn is_show_all(&self) -> bool {
        let query = self.query.trim().to_lowercase();
        query == "all" || query == format!("all_{}", self.field.trim().to_lowercase())
    }
}

//==============================================================================
// Filtering
//==============================================================================

/// The column used for range filtering: the configured name when present,
/// otherwise the first column whose name mentions "date".
pub fn resolve_date_column(table: &Table, date_column: &str) -> Option<usize> {
    columns::resolve(
        table,
        &[Matcher::Exact(date_column), Matcher::Contains("date")],
    )
}

/// Narrow `table` to the rows matching `range` and `field`, in that order.
///
/// Rows with a null date are excluded while a range is active. When no
/// date-bearing column exists, or the field filter's column cannot be
/// resolved, the corresponding filter passes the table through untouched.
pub fn filter_rows(
    table: &Table,
    date_column: &str,
    range: Option<&DateRange>,
    field: Option<&FieldFilter>,
) -> Table {
    let mut out = match (range, resolve_date_column(table, date_column)) {
        (Some(range), Some(col)) => table.retain_rows(|row| {
            row[col]
                .as_date()
                .map(|date| range.contains(date))
                .unwrap_or(false)
        }),
        _ => table.clone(),
    };

    if let Some(filter) = field {
        if !filter.is_show_all() {
            if let Some(col) = columns::resolve_field(&out, &filter.field) {
                let want = filter.query.trim().to_lowercase();
                out = out.retain_rows(|row| {
                    row[col]
                        .fold_key()
                        .map(|value| value == want)
                        .unwrap_or(false)
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Table {
        let mut t = Table::new(vec!["Date".to_string(), "BD Name".to_string()]);
        t.push_row(vec![
            CellValue::Date(ymd(2024, 1, 15)),
            CellValue::Text("Asha".to_string()),
        ]);
        t.push_row(vec![
            CellValue::Date(ymd(2024, 2, 1)),
            CellValue::Text("Ravi".to_string()),
        ]);
        t.push_row(vec![CellValue::Null, CellValue::Text("asha".to_string())]);
        t
    }

    // ==================== Presets ====================

    #[test]
    fn test_preset_today_and_yesterday() {
        let today = ymd(2024, 3, 5);
        assert_eq!(
            DateRange::from_preset("today", today),
            Some(DateRange::new(today, today))
        );
        assert_eq!(
            DateRange::from_preset("yesterday", today),
            Some(DateRange::new(ymd(2024, 3, 4), ymd(2024, 3, 4)))
        );
    }

    #[test]
    fn test_preset_rolling_windows() {
        let today = ymd(2024, 3, 5);
        assert_eq!(
            DateRange::from_preset("last7", today),
            Some(DateRange::new(ymd(2024, 2, 28), today))
        );
        assert_eq!(
            DateRange::from_preset("last_7_days", today),
            DateRange::from_preset("last7", today)
        );
        assert_eq!(
            DateRange::from_preset("last_30_days", today),
            Some(DateRange::new(ymd(2024, 2, 5), today))
        );
        assert_eq!(
            DateRange::from_preset("next7", today),
            Some(DateRange::new(today, ymd(2024, 3, 12)))
        );
    }

    #[test]
    fn test_preset_calendar_windows() {
        // 2024-03-05 is a Tuesday
        let today = ymd(2024, 3, 5);
        assert_eq!(
            DateRange::from_preset("thisweek", today),
            Some(DateRange::new(ymd(2024, 3, 4), ymd(2024, 3, 10)))
        );
        assert_eq!(
            DateRange::from_preset("this_month", today),
            Some(DateRange::new(ymd(2024, 3, 1), ymd(2024, 3, 31)))
        );
        assert_eq!(
            DateRange::from_preset("this_year", today),
            Some(DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31)))
        );
    }

    #[test]
    fn test_preset_month_end_clamps() {
        let today = ymd(2024, 2, 10);
        assert_eq!(
            DateRange::from_preset("thismonth", today),
            Some(DateRange::new(ymd(2024, 2, 1), ymd(2024, 2, 29)))
        );
    }

    #[test]
    fn test_unknown_preset_is_none() {
        let today = ymd(2024, 3, 5);
        assert_eq!(DateRange::from_preset("custom", today), None);
        assert_eq!(DateRange::from_preset("", today), None);
        assert_eq!(DateRange::from_preset("fortnight", today), None);
    }

    // ==================== Range resolution ====================

    #[test]
    fn test_explicit_dates_override_preset() {
        let today = ymd(2024, 3, 5);
        let range = resolve_range(
            Some("today"),
            Some("2024-01-01"),
            Some("2024-01-31"),
            today,
        )
        .unwrap()
        .unwrap();
        assert_eq!(range, DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 31)));
    }

    #[test]
    fn test_malformed_explicit_date_is_validation_error() {
        let today = ymd(2024, 3, 5);
        let err = resolve_range(None, Some("01-01-2024"), Some("2024-01-31"), today).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_lone_start_falls_back_to_preset() {
        let today = ymd(2024, 3, 5);
        let range = resolve_range(Some("today"), Some("2024-01-01"), None, today).unwrap();
        assert_eq!(range, Some(DateRange::new(today, today)));
    }

    // ==================== Filtering ====================

    #[test]
    fn test_no_filters_is_identity() {
        let t = sample();
        let out = filter_rows(&t, "Date", None, None);
        assert_eq!(out, t);
    }

    #[test]
    fn test_date_range_excludes_out_of_range_and_null() {
        let t = sample();
        let range = DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 31));
        let out = filter_rows(&t, "Date", Some(&range), None);
        assert_eq!(out.row_count(), 1);
        assert_eq!(*out.cell(0, 1), CellValue::Text("Asha".to_string()));
    }

    #[test]
    fn test_missing_date_column_passes_through() {
        let mut t = Table::new(vec!["Name".to_string()]);
        t.push_row(vec![CellValue::Text("x".to_string())]);
        let range = DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 31));
        let out = filter_rows(&t, "Date", Some(&range), None);
        assert_eq!(out.row_count(), 1);
    }

    #[test]
    fn test_field_filter_matches_case_insensitively() {
        let t = sample();
        let filter = FieldFilter::new("bd", "ASHA");
        let out = filter_rows(&t, "Date", None, Some(&filter));
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn test_show_all_sentinel_is_no_op() {
        let t = sample();
        for query in ["all", "ALL", "all_bd", "All_BD"] {
            let filter = FieldFilter::new("bd", query);
            assert!(filter.is_show_all(), "{query}");
            let out = filter_rows(&t, "Date", None, Some(&filter));
            assert_eq!(out.row_count(), 3);
        }
        assert!(!FieldFilter::new("bd", "all_city").is_show_all());
    }

    #[test]
    fn test_unresolvable_field_passes_through() {
        let t = sample();
        let filter = FieldFilter::new("nonexistent", "x");
        let out = filter_rows(&t, "Date", None, Some(&filter));
        assert_eq!(out.row_count(), 3);
    }

    #[test]
    fn test_filters_compose() {
        let t = sample();
        let range = DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31));
        let filter = FieldFilter::new("bd", "asha");

        let composed = filter_rows(&t, "Date", Some(&range), Some(&filter));
        let staged = filter_rows(
            &filter_rows(&t, "Date", Some(&range), None),
            "Date",
            None,
            Some(&filter),
        );
        assert_eq!(composed, staged);
        assert_eq!(composed.row_count(), 1);
    }
}
