//! Proxy core subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection
//!     → server.rs (accept loop, one task per connection)
//!     → handler.rs (receive → parse → branch)
//!         CONNECT   → upstream.rs (dial) → tunnel.rs (bidirectional relay)
//!         otherwise → cache lookup → upstream.rs (dial) → forward response
//! ```
//!
//! # Design Decisions
//! - Failures are local to one connection: logged at the accept-loop
//!   boundary, resolved by dropping that connection's sockets
//! - Responses are fully buffered before caching and forwarding; there is
//!   no streaming of plain HTTP responses

pub mod handler;
pub mod server;
pub mod tunnel;
pub mod upstream;

pub use server::ProxyServer;
