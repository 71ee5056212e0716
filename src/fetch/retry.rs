//! Retrying transient request failures with exponential backoff.

use std::{future::Future, time::Duration};

use crate::{Error, fetch::TransportError};

const DEFAULT_MAX_RETRIES: u32 = 7;
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Something that can wait, so that tests do not have to.
pub trait Sleeper {
    /// Wait for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Waits with the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How many times a request is retried and how long to wait in between.
///
/// The first request is not a retry, so up to `max_retries + 1` requests are
/// sent. Retry `n` (1-based) waits `base_delay * 2^n` beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// How many times a failed request is sent again.
    pub max_retries: u32,
    /// The delay that is doubled for each retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// The wait before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }

    /// Run `operation` until it succeeds, fails permanently, or runs out of retries.
    ///
    /// # Errors
    /// Returns [Error::Transport] straight away for a failure that is not
    /// transient, and [Error::RetriesExhausted] once every retry has failed.
    pub async fn run<T, S, F, Fut>(&self, sleeper: &S, mut operation: F) -> Result<T, Error>
    where
        S: Sleeper,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut retries = 0;

        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if !error.is_transient() => return Err(Error::Transport(error)),
                Err(error) => error,
            };

            if retries >= self.max_retries {
                return Err(Error::RetriesExhausted {
                    attempts: retries + 1,
                    last_error: error,
                });
            }

            retries += 1;
            let wait = self.delay_for(retries);
            tracing::warn!(
                "{error}. Retrying in {}s... ({retries}/{})",
                wait.as_secs_f64(),
                self.max_retries
            );
            sleeper.sleep(wait).await;
        }
    }
}
