use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("sheet error: {0}")]
    Sheet(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl DashboardError {
    /// True for errors caused by malformed caller input rather than the
    /// upstream spreadsheet. The API layer maps these to 400.
    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Validation(_))
    }
}
