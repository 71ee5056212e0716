//! Paging through the search results of each category.

use crate::{
    Error,
    fetch::{FetchConfig, RetryPolicy, SearchRequest, Sleeper, TransactionRecord, Transport},
    storage::{category_file_path, write_records},
};

/// What happened when fetching a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// At least one record was fetched and written to disk.
    Saved {
        /// The number of records written.
        records: usize,
        /// The number of non-empty pages that were received.
        pages: u32,
        /// False if paging stopped early because a page kept failing.
        complete: bool,
    },
    /// The API had no records for the category, nothing was written.
    NoRecords {
        /// False if the first page kept failing.
        complete: bool,
    },
}

impl CategoryOutcome {
    /// Whether every page of the category was fetched.
    pub fn is_complete(&self) -> bool {
        match self {
            CategoryOutcome::Saved { complete, .. } | CategoryOutcome::NoRecords { complete } => {
                *complete
            }
        }
    }
}

/// The outcome of every category in a run, in the order they were fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Pairs of NAICS code and outcome.
    pub categories: Vec<(String, CategoryOutcome)>,
}

impl FetchSummary {
    /// The total number of records written across all categories.
    pub fn records_saved(&self) -> usize {
        self.categories
            .iter()
            .map(|(_, outcome)| match outcome {
                CategoryOutcome::Saved { records, .. } => *records,
                CategoryOutcome::NoRecords { .. } => 0,
            })
            .sum()
    }

    /// The NAICS codes whose paging stopped early.
    pub fn incomplete_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, outcome)| !outcome.is_complete())
            .map(|(code, _)| code.as_str())
            .collect()
    }
}

/// Fetch every page of the category `naics_code` and save the records.
///
/// Pages are requested from 1 upwards until a page comes back empty, waiting
/// `config.page_delay` after each non-empty page. If a page still fails with
/// a transient error after every retry, paging stops and whatever was
/// already received is saved.
///
/// A category without any records leaves an existing file for it untouched.
///
/// # Errors
/// Returns an error if the API rejects a request outright, e.g. with an
/// error status, or if the records cannot be written. In the first case the
/// pages received before the failing one are still saved.
pub async fn fetch_category<T, S>(
    config: &FetchConfig,
    policy: &RetryPolicy,
    transport: &T,
    sleeper: &S,
    naics_code: &str,
) -> Result<CategoryOutcome, Error>
where
    T: Transport,
    S: Sleeper,
{
    tracing::info!("Fetching NAICS {naics_code}");

    let mut records: Vec<TransactionRecord> = Vec::new();
    let mut page = 1;
    let mut pages = 0;
    let mut complete = true;

    loop {
        let request = SearchRequest::for_page(config, naics_code, page);

        let results = match policy.run(sleeper, || transport.search(&request)).await {
            Ok(search_page) => search_page.results,
            Err(error @ Error::RetriesExhausted { .. }) => {
                tracing::error!("NAICS {naics_code} page {page}: {error}");
                complete = false;
                break;
            }
            Err(error) => {
                tracing::error!("NAICS {naics_code} page {page}: {error}");
                if !records.is_empty() {
                    save_records(config, naics_code, &records)?;
                }
                return Err(error);
            }
        };

        if results.is_empty() {
            break;
        }

        tracing::info!(
            "NAICS {naics_code} page {page} fetched, {} records",
            results.len()
        );
        records.extend(results);
        pages += 1;
        page += 1;

        sleeper.sleep(config.page_delay).await;
    }

    if records.is_empty() {
        tracing::info!("No records found for NAICS {naics_code}");
        return Ok(CategoryOutcome::NoRecords { complete });
    }

    save_records(config, naics_code, &records)?;

    Ok(CategoryOutcome::Saved {
        records: records.len(),
        pages,
        complete,
    })
}

fn save_records(
    config: &FetchConfig,
    naics_code: &str,
    records: &[TransactionRecord],
) -> Result<(), Error> {
    let path = category_file_path(&config.output_dir, naics_code);
    write_records(&path, records)?;
    tracing::info!(
        "Saved {} records for NAICS {naics_code} to {}",
        records.len(),
        path.display()
    );

    Ok(())
}

/// Fetch every category in `config.naics_codes`, in order.
///
/// The output directory is created if it does not exist.
///
/// # Errors
/// Stops at the first category that fails with an error, see
/// [fetch_category]. Categories fetched before it keep their files.
pub async fn fetch_all<T, S>(
    config: &FetchConfig,
    policy: &RetryPolicy,
    transport: &T,
    sleeper: &S,
) -> Result<FetchSummary, Error>
where
    T: Transport,
    S: Sleeper,
{
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|error| Error::Io(config.output_dir.clone(), error.to_string()))?;

    let mut summary = FetchSummary::default();

    for naics_code in &config.naics_codes {
        let outcome = fetch_category(config, policy, transport, sleeper, naics_code).await?;
        summary.categories.push((naics_code.clone(), outcome));
    }

    Ok(summary)
}
