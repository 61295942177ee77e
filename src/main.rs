use clap::{Args, Parser, Subcommand};

use sheetboard::api::server::ApiConfig;
use sheetboard::api::run_api_server;
use sheetboard::cli;
use sheetboard::config::DashboardConfig;

#[derive(Parser)]
#[command(name = "sheetboard")]
#[command(about = "Dashboard over a shared spreadsheet: fetch, filter, summarize, serve.")]
#[command(long_about = "Sheetboard - read-only dashboard over a shared spreadsheet

Downloads a spreadsheet from its share link, parses the first sheet into a
table, and filters or summarizes it. The serve command exposes the same
operations as a JSON API with an in-memory cache.

COMMANDS:
  serve    - Run the HTTP API server
  columns  - Print column names and row count
  counts   - Print aggregate counts, optionally filtered
  rows     - Print the table as JSON rows

EXAMPLES:
  sheetboard --sheet-url \"$SHEET_URL\" columns
  sheetboard counts --type last7 --field bd --query asha
  sheetboard counts --start 2024-01-01 --end 2024-01-31 --json
  sheetboard serve --host 0.0.0.0 --port 3000

Configuration may also come from the environment: SHEET_URL,
SHEET_API_KEY, DATE_COLUMN, CACHE_SECONDS, FETCH_TIMEOUT_SECONDS.")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
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

impl SourceArgs {
    fn into_config(self) -> DashboardConfig {
        DashboardConfig {
            sheet_url: self.sheet_url,
            api_key: self.api_key,
            date_column: self.date_column,
            cache_secs: self.cache_secs,
            fetch_timeout_secs: self.fetch_timeout_secs,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Host address to bind to (use 0.0.0.0 for all interfaces)
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SHEETBOARD_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "SHEETBOARD_PORT")]
        port: u16,
    },

    /// Print the sheet's column names and row count
    Columns,

    /// Print the aggregate counts, optionally filtered
    Counts {
        /// Named range preset (today, yesterday, last7, this_month, ...)
        #[arg(long = "type", value_name = "PRESET")]
        preset: Option<String>,

        /// Range start, YYYY-MM-DD (with --end, overrides the preset)
        #[arg(long)]
        start: Option<String>,

        /// Range end, YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,

        /// Field to filter on (bd, city, hospital, state, or a column name)
        #[arg(short, long)]
        field: Option<String>,

        /// Value the field must equal, case-insensitive
        #[arg(short, long)]
        query: Option<String>,

        /// Print raw JSON instead of the formatted summary
        #[arg(long)]
        json: bool,
    },

    /// Print the table as JSON rows
    Rows {
        /// Maximum number of rows to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.source.into_config();

    match cli.command {
        Commands::Serve { host, port } => run_api_server(ApiConfig { host, port }, config).await,

        Commands::Columns => Ok(cli::columns(config).await?),

        Commands::Counts {
            preset,
            start,
            end,
            field,
            query,
            json,
        } => Ok(cli::counts(config, preset, start, end, field, query, json).await?),

        Commands::Rows { limit } => Ok(cli::rows(config, limit).await?),
    }
}
