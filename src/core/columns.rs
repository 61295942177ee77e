//! Column resolution.
//!
//! The upstream sheet is hand-edited and duck-typed: column names drift,
//! carry stray whitespace, and differ between deployments. Every lookup
//! therefore goes through an explicit ordered chain of matchers instead
//! of ad hoc string scans.

use crate::types::Table;

/// One step of a resolution chain, compared on trimmed, case-folded names.
#[derive(Debug, Clone, Copy)]
pub enum Matcher<'a> {
    /// Column whose name equals the candidate.
    Exact(&'a str),
    /// First column whose name contains the candidate.
    Contains(&'a str),
    /// The table's first column, whatever its name.
    First,
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolve a column through `chain`, first match wins. Returns the column
/// index, or `None` when nothing in the chain matches.
pub fn resolve(table: &Table, chain: &[Matcher]) -> Option<usize> {
    for matcher in chain {
        let found = match matcher {
            Matcher::Exact(want) => {
                let want = fold(want);
                table.columns().iter().position(|c| fold(c) == want)
            }
            Matcher::Contains(want) => {
                let want = fold(want);
                if want.is_empty() {
                    None
                } else {
                    table.columns().iter().position(|c| fold(c).contains(&want))
                }
            }
            Matcher::First => (!table.columns().is_empty()).then_some(0),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Short aliases the dashboard front end sends for its dropdown filters.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("bd", "BD"),
    ("city", "City"),
    ("hospital", "Hospital"),
    ("state", "State"),
];

/// Resolve a caller-supplied field name to a column.
///
/// Known aliases match by substring on their mapped name (so `bd` finds a
/// `BD Name` column); anything else matches exactly first, then by
/// substring.
pub fn resolve_field(table: &Table, field: &str) -> Option<usize> {
    let key = fold(field);
    match FIELD_ALIASES.iter().find(|(alias, _)| *alias == key) {
        Some((_, target)) => resolve(table, &[Matcher::Contains(target)]),
        None => resolve(table, &[Matcher::Exact(field), Matcher::Contains(field)]),
    }
}
