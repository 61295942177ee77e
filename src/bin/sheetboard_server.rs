//! Sheetboard API server binary
//!
//! Server-only entry point for deployments that never use the CLI.

use clap::Parser;

use sheetboard::api::server::ApiConfig;
use sheetboard::api::run_api_server;
use sheetboard::config::DashboardConfig;

#[derive(Parser, Debug)]
#[command(name = "sheetboard-server")]
#[command(version)]
#[command(about = "Sheetboard API server - JSON dashboard over a shared spreadsheet")]
#[command(long_about = r#"
Sheetboard API server

Endpoints:
  GET /api/data           - full table with counts
  GET /api/filter         - filtered table (type/start/end/field/q)
  GET /api/counts         - counts only, same parameters
  GET /api/unique/:field  - distinct values of a column
  GET /api/debug/columns  - column names and sample rows
  GET /health             - liveness and cache state

Example usage:
  sheetboard-server --sheet-url "$SHEET_URL"
  sheetboard-server --host 0.0.0.0 --port 3000

  curl "http://localhost:8080/api/filter?type=last7&field=bd&q=all_bd"
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SHEETBOARD_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SHEETBOARD_PORT")]
    port: u16,

    /// Share link or direct export URL of the source spreadsheet
    #[arg(long, env = "SHEET_URL")]
    sheet_url: String,

    /// Bearer token sent with the download request
    #[arg(long, env = "SHEET_API_KEY")]
    api_key: Option<String>,

    /// Column coerced to dates and used for range filtering
    #[arg(long, env = "DATE_COLUMN", default_value = "Date")]
    date_column: String,

    /// Seconds a fetched table is served without re-fetching
    #[arg(long, env = "CACHE_SECONDS", default_value = "60")]
    cache_secs: u64,

    /// Bound on the spreadsheet download, in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECONDS", default_value = "30")]
    fetch_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let api = ApiConfig {
        host: args.host,
        port: args.port,
    };
    let dashboard = DashboardConfig {
        sheet_url: args.sheet_url,
        api_key: args.api_key,
        date_column: args.date_column,
        cache_secs: args.cache_secs,
        fetch_timeout_secs: args.fetch_timeout_secs,
    };

    run_api_server(api, dashboard).await
}
