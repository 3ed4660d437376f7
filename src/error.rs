//! Per-connection error definitions.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while handling a single proxied connection.
///
/// Every variant is terminal for the connection it arose on: the handler
/// logs it and drops the sockets. Nothing here crosses connection
/// boundaries or reaches the accept loop as a failure.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Request line did not contain exactly `method target version`.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// A non-empty header line without a `:` separator.
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    /// The request target could not be resolved to a host and port.
    #[error("unresolvable target {0:?}")]
    InvalidTarget(String),

    /// Outbound connection failed (DNS, refused, or connect timeout).
    #[error("dial {endpoint} failed: {source}")]
    Dial {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failure on an established socket.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The client sent nothing within the receive timeout.
    #[error("client read timed out after {0:?}")]
    ClientTimeout(Duration),
}
