//! Wire-level HTTP framing subsystem.
//!
//! # Data Flow
//! ```text
//! Raw bytes from the client socket
//!     → io.rs (read until end-of-headers or close)
//!     → request.rs (request line + header block → ParsedRequest)
//!     → endpoint.rs (target + Host header → host:port)
//!     → handler decides: tunnel or forward
//! ```
//!
//! # Design Decisions
//! - Only the request line and headers are parsed; bodies are opaque bytes
//! - Header keys are lowercased at parse time; lookups are case-insensitive
//! - A header line without a colon aborts the request instead of being
//!   silently dropped

pub mod endpoint;
pub mod io;
pub mod request;

pub use endpoint::{resolve_url, Endpoint};
pub use request::{Headers, ParsedRequest};
