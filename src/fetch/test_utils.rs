//! Fakes for exercising the fetcher without a network or a clock.

use std::{collections::VecDeque, sync::Mutex, time::Duration};

use serde_json::{Value, json};

use crate::fetch::{SearchPage, SearchRequest, Sleeper, TransactionRecord, Transport, TransportError};

/// Records every requested wait and returns immediately.
#[derive(Debug, Default)]
pub(crate) struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub(crate) fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Answers requests with a fixed script of responses, in order.
///
/// Once the script runs out every further request gets an empty page.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<SearchPage, TransportError>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(
        responses: impl IntoIterator<Item = Result<SearchPage, TransportError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The (category, page) pairs that were requested, in order.
    pub(crate) fn requested_pages(&self) -> Vec<(String, u32)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| (request.filters.naics_codes.join(","), request.page))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchPage::default()))
    }
}

/// A page holding one record per state code, with the code in both state columns.
pub(crate) fn page_of(state_codes: &[&str]) -> Result<SearchPage, TransportError> {
    let results = state_codes
        .iter()
        .map(|&code| {
            record(json!({
                "Award ID": format!("AWARD-{code}"),
                "Transaction Amount": 1000.0,
                "pop_state_code": code,
                "recipient_location_state_code": code,
            }))
        })
        .collect();

    Ok(SearchPage { results })
}

pub(crate) fn empty_page() -> Result<SearchPage, TransportError> {
    Ok(SearchPage::default())
}

pub(crate) fn connection_error() -> Result<SearchPage, TransportError> {
    Err(TransportError::Connection("connection refused".to_owned()))
}

/// Build a record from a JSON object literal.
pub(crate) fn record(value: Value) -> TransactionRecord {
    match value {
        Value::Object(map) => TransactionRecord(map),
        other => panic!("expected a JSON object, got {other}"),
    }
}
