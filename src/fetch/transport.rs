//! Sending search requests over HTTP.

use std::{future::Future, time::Duration};

use crate::fetch::{SearchPage, SearchRequest};

/// Why a single request failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established or was dropped.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request did not complete within the per-request timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status code.
    #[error("server responded with status {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The error text.
        message: String,
    },

    /// The response body was not a valid search page.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Any other request failure, e.g. an invalid URL.
    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Whether retrying the same request may succeed.
    ///
    /// Only network level failures are transient, HTTP error statuses are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TransportError::Connection(_) | TransportError::Timeout(_)
        )
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout(error.to_string())
        } else if error.is_connect() {
            TransportError::Connection(error.to_string())
        } else if let Some(status) = error.status() {
            TransportError::Status {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else if error.is_decode() {
            TransportError::Decode(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

/// Something that can answer a search request with a page of results.
pub trait Transport {
    /// Send `request` once, without retrying.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchPage, TransportError>> + Send;
}

/// Sends search requests to the API with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport that POSTs to `endpoint` and gives up on a request
    /// after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created, e.g. when the
    /// TLS backend fails to initialize.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }
}

impl Transport for HttpTransport {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<SearchPage>().await?)
    }
}
