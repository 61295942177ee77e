//! Filtering and aggregation core shared by every transport entry point.

pub mod columns;
pub mod filter;
pub mod summary;

pub use filter::{filter_rows, DateRange, FieldFilter};
pub use summary::{summarize, CountsSummary};
