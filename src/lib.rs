//! Spendmap collects U.S. federal defense contract transactions and shows
//! how many contracts each state performs and receives on an interactive map.
//!
//! The crate has three parts, each with its own binary:
//! - `fetch` downloads transactions for a list of defense NAICS codes from
//!   the USAspending search API and saves one parquet file per code.
//! - `server` counts the transactions per state and serves the dashboard.
//! - `inspect` prints a summary of a saved parquet file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod not_found;
mod routing;

pub mod aggregation;
pub mod dashboard;
pub mod fetch;
pub mod inspect;
pub mod logging;
pub mod state_view;
pub mod states;
pub mod storage;

pub use aggregation::{Counts, StateCounts, aggregate_state_counts};
pub use app_state::AppState;
pub use error::Error;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
