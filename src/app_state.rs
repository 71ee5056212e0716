//! Implements a struct that holds the state of the dashboard server.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{Error, aggregation::aggregate_state_counts, dashboard::DashboardSession};

/// The state of the dashboard server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The dashboard session, built once when the server starts.
    pub session: Arc<Mutex<DashboardSession>>,
}

impl AppState {
    /// Create a new [AppState] from the parquet files in `data_dir`.
    ///
    /// The files are aggregated once here, later changes to them are not
    /// picked up until the server restarts.
    ///
    /// # Errors
    /// Returns [Error::NoInputData] if `data_dir` has no parquet files, or an
    /// error if they cannot be read.
    pub fn new(data_dir: &Path) -> Result<Self, Error> {
        let counts = aggregate_state_counts(data_dir)?;

        Ok(Self::from_session(DashboardSession::new(&counts)))
    }

    /// Create a new [AppState] around an existing session.
    pub fn from_session(session: DashboardSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}
