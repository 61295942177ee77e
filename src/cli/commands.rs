use chrono::Local;
use colored::Colorize;
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::core::filter::{self, FieldFilter};
use crate::core::summary::summarize;
use crate::error::DashboardResult;
use crate::serialize::to_json_rows;
use crate::sheet::SheetFetcher;
use crate::types::Table;

async fn fetch_table(config: &DashboardConfig) -> DashboardResult<Table> {
    let fetcher = SheetFetcher::new(config)?;
    fetcher.fetch().await
}

/// Execute the columns command: fetch once, print the sheet's shape.
pub async fn columns(config: DashboardConfig) -> DashboardResult<()> {
    println!("{}", "📒 Sheetboard - Columns".bold().green());
    println!("   Source: {}", config.sheet_url);
    println!();

    let table = fetch_table(&config).await?;

    println!(
        "   {} rows × {} columns",
        table.row_count().to_string().cyan(),
        table.columns().len().to_string().cyan()
    );
    for name in table.columns() {
        println!("   - {}", name);
    }
    Ok(())
}

/// Execute the counts command: fetch, filter, print the summary.
#[allow(clippy::too_many_arguments)]
pub async fn counts(
    config: DashboardConfig,
    preset: Option<String>,
    start: Option<String>,
    end: Option<String>,
    field: Option<String>,
    query: Option<String>,
    json: bool,
) -> DashboardResult<()> {
    let table = fetch_table(&config).await?;

    let range = filter::resolve_range(
        preset.as_deref(),
        start.as_deref(),
        end.as_deref(),
        Local::now().date_naive(),
    )?;
    let field_filter = match (field, query) {
        (Some(field), Some(query)) => Some(FieldFilter::new(field, query)),
        _ => None,
    };

    let filtered = filter::filter_rows(
        &table,
        &config.date_column,
        range.as_ref(),
        field_filter.as_ref(),
    );
    let summary = summarize(&filtered);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "📊 Sheetboard - Counts".bold().green());
    if let Some(range) = range {
        println!("   Range: {} → {}", range.start, range.end);
    }
    println!();
    println!(
        "   Total records:          {}",
        summary.total_records.to_string().cyan()
    );
    println!(
        "   OPD completed:          {}",
        summary.opd_count.to_string().cyan()
    );
    println!(
        "   IPD completed:          {}",
        summary.ipd_count.to_string().cyan()
    );
    println!(
        "   Surgery suggested:      {}",
        summary.surgery_suggested.to_string().cyan()
    );
    println!(
        "   Diagnostic suggested:   {}",
        summary.diagnostic_suggested.to_string().cyan()
    );
    println!(
        "   Surgery not suggested:  {}",
        summary.surgery_not_suggested.to_string().cyan()
    );
    Ok(())
}

/// Execute the rows command: fetch and print serialized rows as JSON.
pub async fn rows(config: DashboardConfig, limit: Option<usize>) -> DashboardResult<()> {
    let table = fetch_table(&config).await?;

    let mut rows = to_json_rows(&table);
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    println!("{}", serde_json::to_string_pretty(&Value::Array(rows))?);
    Ok(())
}
