//! Accept loop and server lifecycle.
//!
//! # Responsibilities
//! - Accept connections and spawn one handler task per connection
//! - Log per-connection failures at the boundary; never let one
//!   connection's error affect another or stop the loop
//! - Drain in-flight connections on shutdown, with a deadline

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::cache::{sweeper, ResponseCache};
use crate::config::ProxyConfig;
use crate::net::{ConnectionTracker, Listener, ListenerError};
use crate::proxy::handler;

/// How long shutdown waits for in-flight connections before giving up.
const DRAIN_DEADLINE: Duration = Duration::from_secs(10);

/// The forward proxy server: configuration, the shared response cache,
/// and the accept loop that ties them to connections.
pub struct ProxyServer {
    config: Arc<ProxyConfig>,
    cache: Arc<ResponseCache>,
    tracker: ConnectionTracker,
}

impl ProxyServer {
    /// Create a server with a fresh cache built from the configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let cache = Arc::new(ResponseCache::new(
            config.cache.capacity,
            Duration::from_secs(config.cache.ttl_secs),
        ));
        Self {
            config: Arc::new(config),
            cache,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Handle to the shared cache (used by tests and diagnostics).
    pub fn cache(&self) -> Arc<ResponseCache> {
        Arc::clone(&self.cache)
    }

    /// Run the accept loop until the shutdown signal fires, then drain.
    pub async fn run(
        &self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        let addr = listener.local_addr().map_err(ListenerError::Bind)?;
        tracing::info!(address = %addr, "Proxy server starting");

        let sweeper_task = tokio::spawn(sweeper::run(
            Arc::clone(&self.cache),
            Duration::from_secs(self.config.cache.sweep_interval_secs),
            shutdown.resubscribe(),
        ));

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let guard = self.tracker.track(peer);
                            let config = Arc::clone(&self.config);
                            let cache = Arc::clone(&self.cache);
                            tokio::spawn(async move {
                                let id = guard.id();
                                if let Err(error) =
                                    handler::handle(stream, peer, config, cache).await
                                {
                                    tracing::warn!(
                                        connection_id = %id,
                                        peer = %peer,
                                        error = %error,
                                        "Connection ended with error"
                                    );
                                }
                                drop(guard);
                            });
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "Accept failed");
                        }
                    }
                }
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!(
            active = self.tracker.active_count(),
            "Shutdown signalled, draining connections"
        );
        if tokio::time::timeout(DRAIN_DEADLINE, self.tracker.wait_idle())
            .await
            .is_err()
        {
            tracing::warn!(
                active = self.tracker.active_count(),
                "Drain deadline reached, abandoning remaining connections"
            );
        }
        let _ = sweeper_task.await;

        tracing::info!("Proxy server stopped");
        Ok(())
    }
}
