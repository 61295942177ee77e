//! Spreadsheet download.

use std::time::Duration;

use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::sheet::{parser, resolver};
use crate::types::Table;

/// Downloads the configured spreadsheet and parses it into a [`Table`].
///
/// One fetcher is built at startup and shared; each [`fetch`](Self::fetch)
/// is a single bounded GET with an optional bearer token.
pub struct SheetFetcher {
    url: String,
    api_key: Option<String>,
    date_column: String,
    client: reqwest::Client,
}

impl SheetFetcher {
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            url: config.sheet_url.clone(),
            api_key: config.api_key.clone(),
            date_column: config.date_column.clone(),
            client,
        })
    }

    /// Resolve the share link, download the workbook, parse the first
    /// sheet. Non-success HTTP statuses and network failures are fetch
    /// errors; a malformed body is a workbook error.
    pub async fn fetch(&self) -> DashboardResult<Table> {
        let url = resolver::export_url(&self.url);
        debug!(%url, "fetching spreadsheet");

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "spreadsheet downloaded");

        parser::parse_workbook(&bytes, &self.date_column)
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }
}
