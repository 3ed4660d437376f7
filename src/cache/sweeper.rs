//! Background purge of expired entries.
//!
//! # Responsibilities
//! - Periodically remove entries past their TTL so they do not occupy
//!   capacity until the next read touches them
//! - Stop cleanly when shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::cache::store::ResponseCache;

/// Run the sweep loop until the shutdown signal fires.
pub async fn run(
    cache: Arc<ResponseCache>,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; skip it.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = cache.sweep_expired();
                if removed > 0 {
                    tracing::debug!(removed, "swept expired cache entries");
                }
            }
            _ = shutdown.recv() => {
                tracing::debug!("cache sweeper stopping");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sweeper_purges_expired_entries_and_stops_on_shutdown() {
        let cache = Arc::new(ResponseCache::new(10, Duration::from_millis(10)));
        cache.set("k", b"v".to_vec());

        let (tx, rx) = broadcast::channel(1);
        let handle = tokio::spawn(run(
            Arc::clone(&cache),
            Duration::from_millis(20),
            rx,
        ));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.len(), 0);

        tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
