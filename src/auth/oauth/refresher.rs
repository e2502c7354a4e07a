//! Background refresh of StockX access tokens.
//!
//! [`TokenRefresher`] owns a Tokio task that sleeps until the current access
//! token is due to expire, refreshes it, and repeats. The period is re-read
//! from the session after every refresh, so the expiry assigned by StockX
//! drives the schedule.
//!
//! Failed refreshes are retried with exponential backoff (see
//! [`RefreshSchedule`]) and reported on a broadcast channel as
//! [`RefreshEvent`]s. The stale token stays in the session until a refresh
//! succeeds.
//!
//! The task stops when [`TokenRefresher::stop`] is called or the refresher is
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::token_refresh::refresh_access_token;
use crate::auth::oauth::AuthError;
use crate::auth::SessionStore;
use crate::config::StockXConfig;

/// Shortest delay between two refresh attempts.
pub const MIN_REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Notification published by the background refresher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshEvent {
    /// The access token was refreshed.
    Refreshed {
        /// Lifetime of the new access token in seconds.
        expires_in: u64,
    },

    /// A refresh attempt failed. The previous access token is still in use.
    Failed {
        /// HTTP status of the rejected token request, if the server answered.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
        /// Number of failures since the last successful refresh.
        consecutive_failures: u32,
    },

    /// The refresher task exited.
    Stopped,
}

/// Timing policy of the background refresher.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use stockx_api::auth::oauth::RefreshSchedule;
///
/// let schedule = RefreshSchedule {
///     leeway: Duration::from_secs(60),
///     retry_interval: Duration::from_secs(30),
///     max_retry_interval: Duration::from_secs(900),
/// };
///
/// // Healthy: refresh one minute before expiry
/// assert_eq!(schedule.next_delay(3600, 0), Duration::from_secs(3540));
/// // Third failure in a row: 30s * 2^2
/// assert_eq!(schedule.next_delay(3600, 3), Duration::from_secs(120));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshSchedule {
    /// How long before expiry to refresh.
    pub leeway: Duration,
    /// Delay before the first retry after a failure.
    pub retry_interval: Duration,
    /// Upper bound of the retry delay.
    pub max_retry_interval: Duration,
}

impl RefreshSchedule {
    /// Builds the schedule from the refresh settings of `config`.
    #[must_use]
    pub const fn from_config(config: &StockXConfig) -> Self {
        Self {
            leeway: config.refresh_leeway(),
            retry_interval: config.refresh_retry_interval(),
            max_retry_interval: config.refresh_retry_max_interval(),
        }
    }

    /// Returns how long to wait before the next refresh attempt.
    ///
    /// Without failures this is `expires_in` minus the leeway. After failures
    /// the retry interval doubles per failure up to `max_retry_interval`, and
    /// never waits past the token expiry. The result is at least
    /// [`MIN_REFRESH_DELAY`].
    #[must_use]
    pub fn next_delay(&self, expires_in: u64, consecutive_failures: u32) -> Duration {
        let until_refresh = Duration::from_secs(expires_in).saturating_sub(self.leeway);

        let delay = if consecutive_failures == 0 {
            until_refresh
        } else {
            let exponent = consecutive_failures.saturating_sub(1).min(16);
            self.retry_interval
                .saturating_mul(1 << exponent)
                .min(self.max_retry_interval)
                .min(until_refresh)
        };

        delay.max(MIN_REFRESH_DELAY)
    }
}

/// Everything needed to refresh the shared session.
#[derive(Clone)]
pub(crate) struct RefreshContext {
    pub http: reqwest::Client,
    pub config: Arc<StockXConfig>,
    pub session: SessionStore,
    /// Serializes token writes so two refreshes cannot interleave.
    pub gate: Arc<Mutex<()>>,
}

impl RefreshContext {
    /// Refreshes the stored session, returning the new `expires_in`.
    pub async fn refresh(&self) -> Result<u64, AuthError> {
        let _guard = self.gate.lock().await;
        let current = self.session.snapshot();
        let refreshed = refresh_access_token(&self.http, &self.config, &current).await?;
        let expires_in = refreshed.expires_in;
        self.session.replace(refreshed);
        Ok(expires_in)
    }
}

/// Handle to a running background refresh task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct TokenRefresher {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl TokenRefresher {
    /// Spawns the refresh loop on the current Tokio runtime.
    pub(crate) fn spawn(context: RefreshContext, events: broadcast::Sender<RefreshEvent>) -> Self {
        let (shutdown, receiver) = watch::channel(false);
        let worker = RefreshWorker {
            schedule: RefreshSchedule::from_config(&context.config),
            context,
            events,
        };
        let handle = tokio::spawn(
            worker
                .run(receiver)
                .instrument(tracing::info_span!("stockx_token_refresher")),
        );
        Self { shutdown, handle }
    }

    /// Signals the task to stop at its next await point.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }

    /// Returns `true` once the task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TokenRefresher {
    fn drop(&mut self) {
        self.stop();
    }
}

struct RefreshWorker {
    context: RefreshContext,
    schedule: RefreshSchedule,
    events: broadcast::Sender<RefreshEvent>,
}

impl RefreshWorker {
    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut consecutive_failures: u32 = 0;

        while !*shutdown.borrow() {
            let delay = self
                .schedule
                .next_delay(self.context.session.expires_in(), consecutive_failures);
            tracing::debug!(delay_secs = delay.as_secs_f64(), "Next token refresh scheduled");

            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => break,
            }

            let outcome = tokio::select! {
                outcome = self.context.refresh() => outcome,
                _ = shutdown.changed() => break,
            };

            match outcome {
                Ok(expires_in) => {
                    consecutive_failures = 0;
                    tracing::info!(expires_in, "Background token refresh succeeded");
                    self.publish(RefreshEvent::Refreshed { expires_in });
                }
                Err(error) => {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    tracing::error!(
                        error = %error,
                        consecutive_failures,
                        "Background token refresh failed"
                    );
                    self.publish(RefreshEvent::Failed {
                        status: error.status(),
                        message: error.to_string(),
                        consecutive_failures,
                    });
                }
            }
        }

        tracing::debug!("Token refresher shutting down");
        self.publish(RefreshEvent::Stopped);
    }

    fn publish(&self, event: RefreshEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}
