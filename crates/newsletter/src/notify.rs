//! Background announcement of newly published posts.
//!
//! [`NotifyScheduler`] runs as a background task, periodically looking for
//! blog and teaching posts that have not been announced and emailing the
//! subscribers interested in each kind.

use std::sync::Arc;
use std::time::Duration;

use codetimes_core::interests::Interest;
use codetimes_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::service::Newsletter;

/// Default polling period.
pub const DEFAULT_NOTIFY_INTERVAL: Duration = Duration::from_secs(3600);

/// Background service that announces pending posts on a fixed period.
pub struct NotifyScheduler {
    pool: DbPool,
    newsletter: Arc<Newsletter>,
    interval: Duration,
}

impl NotifyScheduler {
    pub fn new(pool: DbPool, newsletter: Arc<Newsletter>, interval: Duration) -> Self {
        Self {
            pool,
            newsletter,
            interval,
        }
    }

    /// Run the scheduler loop until `cancel` fires.
    ///
    /// The first pass runs immediately.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Notify scheduler cancelled");
                    break;
                }
                _ = interval.tick() => self.run_once().await,
            }
        }
    }

    /// One pass over every content kind. Errors are logged, never raised.
    pub async fn run_once(&self) {
        for kind in Interest::ALL {
            if let Err(e) = self.newsletter.notify_pending(&self.pool, kind).await {
                tracing::error!(kind = %kind, error = %e, "Failed to process new-post notifications");
            }
        }
    }
}
