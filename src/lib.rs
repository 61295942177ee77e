//! Sheetboard - read-only dashboard over a shared spreadsheet
//!
//! This library downloads a spreadsheet from its share link, parses the
//! first worksheet into an in-memory table, caches the parse for a fixed
//! window, and filters or summarizes the rows for a JSON dashboard.
//!
//! # Features
//!
//! - Google Sheets share-link resolution to a direct XLSX export
//! - Time-windowed single-slot cache, stale-but-available on failed refresh
//! - Pure row filtering by date range and field equality
//! - Fixed-shape aggregate counts over status columns
//! - JSON row serialization with normalized dates, times and nulls
//!
//! # Example
//!
//! ```
//! use sheetboard::core::summary::summarize;
//! use sheetboard::types::{CellValue, Table};
//!
//! let mut table = Table::new(vec!["OPD&IPD".to_string()]);
//! table.push_row(vec![CellValue::Text("OPD Completed".to_string())]);
//! table.push_row(vec![CellValue::Text("Pending".to_string())]);
//!
//! let counts = summarize(&table);
//! assert_eq!(counts.total_records, 2);
//! assert_eq!(counts.opd_count, 1);
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod serialize;
pub mod sheet;
pub mod types;

// Re-export commonly used types
pub use crate::cache::TableCache;
pub use crate::config::DashboardConfig;
pub use crate::core::{CountsSummary, DateRange, FieldFilter};
pub use crate::error::{DashboardError, DashboardResult};
pub use crate::types::{CellValue, Table};
