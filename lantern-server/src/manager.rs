//! Snapshot ownership and the periodic refresh cycle.

use crate::snapshot::{CorpusSnapshot, SnapshotError};
use lantern_corpus::ArticleSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Owns the currently published snapshot and produces new generations.
///
/// The lock around the published Arc is the single point of mutual
/// exclusion in the whole server: `publish` replaces the pointer under a
/// write lock, `current` clones it under a read lock, and nothing else is
/// ever shared mutably. Snapshot contents need no locking because they
/// are immutable once published.
pub struct CorpusManager {
    source: Arc<dyn ArticleSource>,
    current: RwLock<Arc<CorpusSnapshot>>,
}

impl CorpusManager {
    /// Loads and publishes the first snapshot (generation 1).
    ///
    /// There is nothing to serve until this succeeds, so unlike later
    /// refreshes a failure here is fatal to startup.
    pub fn bootstrap(source: Arc<dyn ArticleSource>) -> Result<Self, SnapshotError> {
        let snapshot = CorpusSnapshot::load(source.as_ref(), 1)?;
        info!(
            "corpus ready: {} articles, {}x{} matrix",
            snapshot.article_count,
            snapshot.matrix.num_rows(),
            snapshot.matrix.num_cols()
        );
        Ok(Self {
            source,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Returns the currently published snapshot.
    ///
    /// Cloning the Arc pins it: the caller's view survives any number of
    /// later publications.
    pub async fn current(&self) -> Arc<CorpusSnapshot> {
        self.current.read().await.clone()
    }

    /// Runs the pipeline once and publishes the result as the next
    /// generation. On failure the previously published snapshot stays
    /// current.
    pub async fn refresh(&self) -> Result<u64, SnapshotError> {
        let generation = self.current().await.generation + 1;
        let snapshot = CorpusSnapshot::load(self.source.as_ref(), generation)?;
        self.publish(snapshot).await;
        Ok(generation)
    }

    /// Atomically replaces the published snapshot.
    async fn publish(&self, snapshot: CorpusSnapshot) {
        *self.current.write().await = Arc::new(snapshot);
    }

    /// Refreshes the corpus every `every` until `shutdown` fires or its
    /// sender is dropped. Refresh failures are logged and the next tick
    /// retried on schedule.
    pub async fn run_refresh_task(
        self: Arc<Self>,
        every: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and the corpus was just
        // encoded at bootstrap; consume it so refreshes start one
        // interval from now.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => match self.refresh().await {
                    Ok(generation) => info!("corpus refreshed, now at generation {}", generation),
                    Err(e) => warn!("corpus refresh failed, keeping previous snapshot: {}", e),
                },
                _ = shutdown.changed() => {
                    debug!("refresh task shutting down");
                    break;
                }
            }
        }
    }
}
