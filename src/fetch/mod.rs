//! Fetcher module
//!
//! Downloads transaction records for each defense NAICS code from the
//! USAspending search API, one page at a time, and saves every category that
//! returned records to its own parquet file.

mod config;
mod fetcher;
mod request;
mod retry;
mod transport;

pub use config::{
    AWARD_TYPE_CODES, DEFENSE_NAICS, FetchConfig, REQUESTED_FIELDS, SEARCH_ENDPOINT,
};
pub use fetcher::{CategoryOutcome, FetchSummary, fetch_all, fetch_category};
pub use request::{AwardDateRange, SearchFilters, SearchPage, SearchRequest, SortOrder, TransactionRecord};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{HttpTransport, Transport, TransportError};

#[cfg(test)]
pub(crate) mod test_utils;
