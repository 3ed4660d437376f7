//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log output (stdout, filtered by RUST_LOG or config level)
//!     → Metrics endpoint (optional Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metric updates are cheap (atomic increments behind the facade)
//! - The exporter is optional; recording without it installed is a no-op

pub mod logging;
pub mod metrics;
