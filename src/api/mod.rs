//! Dashboard HTTP API.
//!
//! Thin axum wrappers over the fetch/cache/filter/summary core. Run with
//! `sheetboard serve` or `sheetboard-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
