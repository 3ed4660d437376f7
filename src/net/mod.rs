//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind with SO_REUSEADDR + backlog, accept)
//!     → connection.rs (unique ID, active-connection tracking)
//!     → Hand off to the proxy handler
//! ```
//!
//! # Design Decisions
//! - No admission control: an unbounded number of connections may be in
//!   flight at once, by design
//! - Each connection is tracked so shutdown can drain in-flight work

pub mod connection;
pub mod listener;

pub use connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
pub use listener::{Listener, ListenerError};
