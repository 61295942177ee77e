//! Fixed-shape aggregate counts.

use serde::{Deserialize, Serialize};

use crate::core::columns::{self, Matcher};
use crate::types::Table;

/// Dashboard counters. The key set is fixed: columns or labels missing
/// from the sheet leave their counters at zero, never remove a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountsSummary {
    pub opd_count: usize,
    pub ipd_count: usize,
    pub surgery_suggested: usize,
    pub diagnostic_suggested: usize,
    pub surgery_not_suggested: usize,
    pub total_records: usize,
}

/// The admission-status column: named `OPD&IPD`, or failing that the
/// first column mentioning "status".
fn resolve_admission_column(table: &Table) -> Option<usize> {
    columns::resolve(
        table,
        &[Matcher::Exact("OPD&IPD"), Matcher::Contains("status")],
    )
}

/// The outcome-status column: named `Status` and distinct from the
/// admission column, or failing that the table's first column when
/// distinct.
fn resolve_outcome_column(table: &Table, admission: Option<usize>) -> Option<usize> {
    if let Some(col) = columns::resolve(table, &[Matcher::Exact("Status")]) {
        if Some(col) != admission {
            return Some(col);
        }
    }
    let first = columns::resolve(table, &[Matcher::First])?;
    (Some(first) != admission).then_some(first)
}

/// Compute the counters for `table`. Pure and idempotent: one linear pass
/// per status column, labels compared trimmed and case-folded.
pub fn summarize(table: &Table) -> CountsSummary {
    let mut counts = CountsSummary {
        total_records: table.row_count(),
        ..Default::default()
    };

    let admission = resolve_admission_column(table);
    if let Some(col) = admission {
        for row in table.rows() {
            match row[col].fold_key().as_deref() {
                Some("opd completed") => counts.opd_count += 1,
                Some("ipd completed") => counts.ipd_count += 1,
                _ => {}
            }
        }
    }

    if let Some(col) = resolve_outcome_column(table, admission) {
        for row in table.rows() {
            match row[col].fold_key().as_deref() {
                Some("surgery suggested") => counts.surgery_suggested += 1,
                Some("diagnostic suggested") => counts.diagnostic_suggested += 1,
                Some("surgery not suggested") => counts.surgery_not_suggested += 1,
                _ => {}
            }
        }
    }

    counts
}
