//! Externally supplied configuration.
//!
//! Every knob comes from the environment (or CLI flags that default to the
//! environment); nothing here is derived from the spreadsheet itself.

/// Runtime configuration for the fetch/cache pipeline.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Share link or direct export URL of the source spreadsheet.
    pub sheet_url: String,
    /// Optional bearer token sent with the download request.
    pub api_key: Option<String>,
    /// Column coerced to dates at parse time and used for range filtering.
    pub date_column: String,
    /// Seconds a fetched table is served without re-fetching.
    pub cache_secs: u64,
    /// Bound on the spreadsheet download, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sheet_url: String::new(),
            api_key: None,
            date_column: "Date".to_string(),
            cache_secs: 60,
            fetch_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.date_column, "Date");
        assert_eq!(config.cache_secs, 60);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert!(config.api_key.is_none());
    }
}
