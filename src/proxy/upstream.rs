//! Outbound connections to origin servers.
//!
//! # Responsibilities
//! - Open a TCP connection to a resolved endpoint
//! - Bound connection establishment with the configured timeout
//! - Collapse DNS, refusal, and timeout failures into one error kind
//!
//! # Design Decisions
//! - No retry: a dial failure aborts the request it was for

use std::time::Duration;
use tokio::net::TcpStream;

use crate::error::ProxyError;
use crate::wire::endpoint::Endpoint;

/// Connect to `endpoint`, giving up after `timeout`.
pub async fn dial(endpoint: &Endpoint, timeout: Duration) -> Result<TcpStream, ProxyError> {
    let connect = TcpStream::connect((endpoint.host.as_str(), endpoint.port));

    match tokio::time::timeout(timeout, connect).await {
        Ok(Ok(stream)) => {
            tracing::debug!(endpoint = %endpoint, "upstream connected");
            Ok(stream)
        }
        Ok(Err(source)) => Err(ProxyError::Dial {
            endpoint: endpoint.to_string(),
            source,
        }),
        Err(_) => Err(ProxyError::Dial {
            endpoint: endpoint.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("connect timed out after {:?}", timeout),
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dial_reaches_a_listening_socket() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let endpoint = Endpoint {
            host: addr.ip().to_string(),
            port: addr.port(),
        };
        let result = dial(&endpoint, Duration::from_secs(1)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn refused_connection_is_a_dial_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Endpoint {
            host: addr.ip().to_string(),
            port: addr.port(),
        };
        let result = dial(&endpoint, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ProxyError::Dial { .. })));
    }
}
