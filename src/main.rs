//! CLI entry point for the feedback rater tool.
//!
//! Provides subcommands for building the full dashboard report and for
//! exporting individual aggregate views (breakdowns, time series, tokens,
//! the flattened record table) as CSV for the rendering layer.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use feedback_rater::{
    analyzers::{
        aggregate::{departure_series, filter_origin, token_frequencies, top_categories},
        report::build_report,
        types::{CategoryField, ReportParams},
    },
    dataset::FeedbackDataset,
    fetch::{BasicClient, fetch_bytes},
    loader,
    output::{append_records, write_json_file},
    sentiment::LexiconScorer,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "feedback_rater")]
#[command(about = "Aggregates itinerary feedback into dashboard-ready views", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Origin,
    Destination,
    Vibe,
}

impl From<FieldArg> for CategoryField {
    fn from(f: FieldArg) -> Self {
        match f {
            FieldArg::Origin => CategoryField::Origin,
            FieldArg::Destination => CategoryField::Destination,
            FieldArg::Vibe => CategoryField::Vibe,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full dashboard report from a feedback file or URL
    Report {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file to write the report to
        #[arg(short, long, default_value = "report.json")]
        output: String,

        /// Number of top categories per breakdown
        #[arg(short = 'n', long, default_value_t = 5)]
        top_n: usize,

        /// Restrict all views to a single origin ("All" disables the filter)
        #[arg(long, default_value = "All")]
        origin: String,

        /// Number of budget histogram buckets
        #[arg(short, long, default_value_t = 20)]
        buckets: usize,
    },
    /// Top-N breakdown for one categorical field, appended to CSV
    Breakdown {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Field to group by
        #[arg(short, long, value_enum, default_value_t = FieldArg::Destination)]
        field: FieldArg,

        /// Number of top categories to keep
        #[arg(short = 'n', long, default_value_t = 5)]
        top_n: usize,

        /// CSV file to append results to
        #[arg(short, long, default_value = "breakdown.csv")]
        output: String,
    },
    /// Like-rate time series over departure dates, appended to CSV
    Series {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append results to
        #[arg(short, long, default_value = "series.csv")]
        output: String,
    },
    /// Word-cloud token frequencies, appended to CSV
    Tokens {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append results to
        #[arg(short, long, default_value = "tokens.csv")]
        output: String,
    },
    /// Flattened record table, optionally filtered by origin, appended to CSV
    Table {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Only include records from this origin ("All" disables the filter)
        #[arg(long, default_value = "All")]
        origin: String,

        /// CSV file to append results to
        #[arg(short, long, default_value = "table.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/feedback_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("feedback_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            source,
            output,
            top_n,
            origin,
            buckets,
        } => {
            let dataset = load_source(&source).await?;
            let params = ReportParams {
                top_n,
                origin_filter: if origin == "All" { None } else { Some(origin) },
                bucket_count: buckets,
            };

            let report = build_report(&dataset, &params, &LexiconScorer)?;
            write_json_file(&output, &report)?;
            info!(
                records = report.overview.count,
                liked = report.overview.liked_count,
                output,
                "Report complete"
            );
        }
        Commands::Breakdown {
            source,
            field,
            top_n,
            output,
        } => {
            let dataset = load_source(&source).await?;
            let breakdown = top_categories(&dataset, field.into(), top_n)?;

            append_records(&output, &breakdown.shares)?;
            info!(
                shown = breakdown.shares.len(),
                distinct = breakdown.total_distinct,
                output,
                "Breakdown written"
            );
        }
        Commands::Series { source, output } => {
            let dataset = load_source(&source).await?;
            let series = departure_series(&dataset);

            append_records(&output, &series)?;
            info!(points = series.len(), output, "Time series written");
        }
        Commands::Tokens { source, output } => {
            let dataset = load_source(&source).await?;
            let tokens = token_frequencies(&dataset);

            append_records(&output, &tokens)?;
            info!(tokens = tokens.len(), output, "Token frequencies written");
        }
        Commands::Table {
            source,
            origin,
            output,
        } => {
            let dataset = load_source(&source).await?;
            let subset = filter_origin(&dataset, &origin);

            append_records(&output, subset.rows())?;
            info!(rows = subset.len(), origin, output, "Record table written");
        }
    }

    Ok(())
}

/// Loads and parses a feedback document from a local file path or over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn load_source(source: &String) -> Result<FeedbackDataset> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source)?
    };

    let dataset = loader::from_slice(&bytes)?;

    let date_errors = dataset.date_errors();
    if !date_errors.is_empty() {
        warn!(
            count = date_errors.len(),
            "Records with unparsable departure dates will be missing from the time series"
        );
    }

    Ok(dataset)
}
