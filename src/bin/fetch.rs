use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use time::{Date, macros::format_description};

use spendmap::{
    Error,
    fetch::{
        FetchConfig, HttpTransport, RetryPolicy, SEARCH_ENDPOINT, SortOrder, TokioSleeper, fetch_all,
    },
    logging::setup_logging,
};

/// Download defense contract transactions and save one parquet file per NAICS code.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Where the parquet files are written.
    #[arg(long, default_value = "usa_spending_defense")]
    output_dir: PathBuf,

    /// The search endpoint to POST requests to.
    #[arg(long, default_value = SEARCH_ENDPOINT)]
    endpoint: String,

    /// Number of records requested per page.
    #[arg(long, default_value_t = 100)]
    page_size: u32,

    /// Pause after each page, in milliseconds.
    #[arg(long, default_value_t = 300)]
    page_delay_ms: u64,

    /// How many times a request that failed with a network error is retried.
    #[arg(long, default_value_t = 7)]
    max_retries: u32,

    /// Timeout for a single request, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Sort by transaction amount smallest first instead of largest first.
    #[arg(long)]
    ascending: bool,

    /// First award date, as YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    start_date: Option<Date>,

    /// Last award date, as YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    end_date: Option<Date>,

    /// A NAICS code to fetch. May be repeated. Defaults to the built-in defense codes.
    #[arg(long = "naics")]
    naics_codes: Vec<String>,
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|error| format!("expected a date like 2024-01-31: {error}"))
}

impl Args {
    fn into_config(self) -> (FetchConfig, RetryPolicy) {
        let defaults = FetchConfig::default();

        let config = FetchConfig {
            endpoint: self.endpoint,
            output_dir: self.output_dir,
            naics_codes: if self.naics_codes.is_empty() {
                defaults.naics_codes.clone()
            } else {
                self.naics_codes
            },
            start_date: self.start_date.unwrap_or(defaults.start_date),
            end_date: self.end_date.unwrap_or(defaults.end_date),
            page_size: self.page_size,
            sort_order: if self.ascending {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            },
            page_delay: Duration::from_millis(self.page_delay_ms),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..defaults
        };

        let policy = RetryPolicy {
            max_retries: self.max_retries,
            ..RetryPolicy::default()
        };

        (config, policy)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = setup_logging() {
        eprintln!("Could not set up logging: {error}");
        return ExitCode::FAILURE;
    }

    let (config, policy) = Args::parse().into_config();

    match run(&config, &policy).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &FetchConfig, policy: &RetryPolicy) -> Result<(), Error> {
    let transport = HttpTransport::new(&config.endpoint, config.request_timeout)?;

    tracing::info!(
        "Fetching {} NAICS codes from {} to {} into {}",
        config.naics_codes.len(),
        config.start_date,
        config.end_date,
        config.output_dir.display()
    );

    let summary = fetch_all(config, policy, &transport, &TokioSleeper).await?;

    tracing::info!(
        "All NAICS codes processed, {} records saved",
        summary.records_saved()
    );

    let incomplete = summary.incomplete_categories();
    if !incomplete.is_empty() {
        tracing::warn!(
            "These NAICS codes stopped early after running out of retries: {}",
            incomplete.join(", ")
        );
    }

    Ok(())
}
