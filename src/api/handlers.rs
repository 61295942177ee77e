//! API request handlers.
//!
//! Every data endpoint goes through the same path: cached table →
//! optional filters → counts and/or serialized rows.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::columns;
use crate::core::filter::{self, DateRange, FieldFilter};
use crate::core::summary::{summarize, CountsSummary};
use crate::error::{DashboardError, DashboardResult};
use crate::serialize::to_json_rows;
use crate::types::Table;

use super::server::AppState;

//==============================================================================
// Errors
//==============================================================================

/// Handler-level error: `{ error, success: false }` with the mapped status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": self.message, "success": false })),
        )
            .into_response()
    }
}

//==============================================================================
// Request / response shapes
//==============================================================================

/// Query parameters shared by `/api/filter` and `/api/counts`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    /// Named range preset; explicit `start`/`end` override it.
    #[serde(rename = "type")]
    pub preset: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub field: Option<String>,
    pub q: Option<String>,
}

impl FilterParams {
    pub fn date_range(&self, today: NaiveDate) -> DashboardResult<Option<DateRange>> {
        filter::resolve_range(
            self.preset.as_deref(),
            self.start.as_deref(),
            self.end.as_deref(),
            today,
        )
    }

    pub fn field_filter(&self) -> Option<FieldFilter> {
        match (self.field.as_deref(), self.q.as_deref()) {
            (Some(field), Some(q)) if !field.is_empty() && !q.is_empty() => {
                Some(FieldFilter::new(field, q))
            }
            _ => None,
        }
    }
}

#[derive(Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: Vec<Value>,
    pub counts: CountsSummary,
}

#[derive(Serialize)]
pub struct CountsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub counts: CountsSummary,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub cache_populated: bool,
}

#[derive(Serialize)]
pub struct ColumnsResponse {
    pub success: bool,
    pub columns: Vec<String>,
    pub sample_data: Vec<Value>,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

//==============================================================================
// Shared plumbing
//==============================================================================

async fn cached_table(state: &AppState) -> Result<Arc<Table>, ApiError> {
    state
        .cache
        .get_or_refresh(|| state.fetcher.fetch())
        .await
        .map_err(ApiError::from)
}

async fn filtered_table(state: &AppState, params: &FilterParams) -> Result<Table, ApiError> {
    // validate caller parameters before touching the network
    let range = params.date_range(Local::now().date_naive())?;
    let field = params.field_filter();
    let table = cached_table(state).await?;
    Ok(filter::filter_rows(
        &table,
        &state.date_column,
        range.as_ref(),
        field.as_ref(),
    ))
}

fn data_response(table: &Table) -> DataResponse {
    DataResponse {
        success: true,
        data: to_json_rows(table),
        counts: summarize(table),
    }
}

//==============================================================================
// Handlers
//==============================================================================

/// GET / - service info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(RootResponse {
        name: "Sheetboard API".to_string(),
        version: state.version.clone(),
        endpoints: vec![
            "/health".to_string(),
            "/api/data".to_string(),
            "/api/filter".to_string(),
            "/api/counts".to_string(),
            "/api/unique/:field".to_string(),
            "/api/debug/columns".to_string(),
        ],
    })
}

/// GET /health - liveness plus cache state; never touches the network.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        cache_populated: state.cache.is_populated().await,
    })
}

/// GET /api/data - full table with counts
pub async fn api_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse>, ApiError> {
    let table = cached_table(&state).await?;
    Ok(Json(data_response(&table)))
}

/// GET /api/filter - filtered table with counts
pub async fn api_filter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DataResponse>, ApiError> {
    let table = filtered_table(&state, &params).await?;
    Ok(Json(data_response(&table)))
}

/// GET /api/counts - counts only, same filter parameters
pub async fn api_counts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<CountsResponse>, ApiError> {
    let table = filtered_table(&state, &params).await?;
    Ok(Json(CountsResponse {
        success: true,
        counts: summarize(&table),
    }))
}

/// GET /api/unique/:field - sorted distinct values of the resolved column
pub async fn api_unique(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let table = cached_table(&state).await?;

    let col = columns::resolve_field(&table, &field)
        .ok_or_else(|| ApiError::not_found(format!("column for '{}' not found", field)))?;

    let values: BTreeSet<String> = table
        .rows()
        .filter_map(|row| row[col].to_text())
        .collect();
    Ok(Json(values.into_iter().collect()))
}

/// GET /api/debug/columns - column names and sample rows
pub async fn debug_columns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let table = cached_table(&state).await?;
    Ok(Json(ColumnsResponse {
        success: true,
        columns: table.columns().to_vec(),
        sample_data: to_json_rows(&table).into_iter().take(5).collect(),
    }))
}
