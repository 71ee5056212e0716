//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, fetch::TransportError, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// No persisted category files were found to aggregate.
    ///
    /// Rendering a map of zeros would hide the fact that the fetch step has
    /// not been run, so callers should stop instead.
    #[error("no input data: no parquet files found in \"{0}\"")]
    NoInputData(PathBuf),

    /// A file system operation failed.
    ///
    /// Callers should pass in the path that was being accessed and the
    /// underlying error as a string.
    #[error("could not access \"{0}\": {1}")]
    Io(PathBuf, String),

    /// A parquet file could not be written or read.
    #[error("parquet error in \"{0}\": {1}")]
    Parquet(PathBuf, String),

    /// An empty set of records was passed to the writer.
    ///
    /// Writing an empty file would overwrite earlier results with nothing.
    #[error("refusing to write an empty record set")]
    EmptyRecordSet,

    /// The remote API answered with a failure that retrying will not fix,
    /// e.g., a 4xx or 5xx status code or a body that is not valid JSON.
    #[error("request to the spending API failed: {0}")]
    Transport(TransportError),

    /// A transient failure kept happening until the retry budget ran out.
    #[error("gave up after {attempts} attempts, last error: {last_error}")]
    RetriesExhausted {
        /// The total number of requests that were sent.
        attempts: u32,
        /// The failure from the final attempt.
        last_error: TransportError,
    },

    /// A state code that is not one of the 50 states was used to select a state.
    #[error("\"{0}\" is not a recognized state code")]
    UnknownState(String),

    /// The dashboard received an event it does not understand, e.g. a state
    /// click without a state code.
    #[error("invalid dashboard event: {0}")]
    InvalidEvent(String),

    /// Could not acquire the dashboard session lock.
    #[error("could not acquire the dashboard session lock")]
    SessionLockError,
}

impl From<TransportError> for Error {
    fn from(value: TransportError) -> Self {
        Error::Transport(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NoInputData(path) => InternalServerError {
                description: "No Data",
                fix: &format!(
                    "No parquet files were found in \"{}\". Run the fetch tool first.",
                    path.display()
                ),
            }
            .into_response(),
            Error::SessionLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx requests.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::UnknownState(code) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Unknown state".to_owned(),
                    details: format!("\"{code}\" is not one of the 50 U.S. state codes."),
                },
            ),
            Error::InvalidEvent(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid request".to_owned(),
                    details: reason,
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
