//! Per-connection request lifecycle.
//!
//! # Responsibilities
//! - Receive and parse one request from the client
//! - Branch: CONNECT → tunnel, anything else → forward (cache first)
//! - Guarantee both sockets are closed on every exit path
//!
//! # State Machine
//! ```text
//! Receiving → Parsed → { Tunneling | Forwarding } → Closed
//! ```
//! Closing is ownership: the client stream and any upstream stream are
//! owned by this call and drop on return, success or failure. No error
//! response is synthesized for the client; a failed request is observed
//! as a closed connection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::cache::{cache_key, is_cacheable, ResponseCache};
use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::observability::metrics;
use crate::proxy::{tunnel, upstream};
use crate::wire::endpoint::{resolve_url, Endpoint};
use crate::wire::io::{header_end, read_request, read_until_close};
use crate::wire::request::{Headers, ParsedRequest};

/// Status line sent to the client once a CONNECT target is reachable.
const TUNNEL_ESTABLISHED: &[u8] = b"HTTP/1.1 200 Connection Established\r\n\r\n";

/// Drive one accepted connection to completion.
pub async fn handle(
    mut client: TcpStream,
    peer: SocketAddr,
    config: Arc<ProxyConfig>,
    cache: Arc<ResponseCache>,
) -> Result<(), ProxyError> {
    let buffer_size = config.listener.read_buffer_size;
    let read_timeout = Duration::from_secs(config.timeouts.client_read_secs);

    let raw = match tokio::time::timeout(read_timeout, read_request(&mut client, buffer_size)).await
    {
        Ok(received) => received?,
        Err(_) => return Err(ProxyError::ClientTimeout(read_timeout)),
    };
    if raw.is_empty() {
        tracing::debug!(peer = %peer, "client closed before sending a request");
        return Ok(());
    }

    let request = ParsedRequest::parse(raw)?;
    tracing::info!(
        peer = %peer,
        method = %request.method,
        target = %request.target,
        version = %request.version,
        "Received request"
    );

    if request.method == "CONNECT" {
        tunnel_to_target(client, &request, &config).await
    } else {
        forward_to_origin(client, &request, &config, &cache).await
    }
}

/// CONNECT branch: dial the authority, confirm to the client, then relay
/// opaque bytes until both directions finish.
async fn tunnel_to_target(
    mut client: TcpStream,
    request: &ParsedRequest,
    config: &ProxyConfig,
) -> Result<(), ProxyError> {
    let endpoint = Endpoint::from_authority(&request.target)?;
    let connect_timeout = Duration::from_secs(config.timeouts.connect_secs);

    let mut target = upstream::dial(&endpoint, connect_timeout).await?;

    client.write_all(TUNNEL_ESTABLISHED).await?;

    // Anything the client sent past the header block already belongs to
    // the tunnel.
    if !request.trailing_bytes().is_empty() {
        target.write_all(request.trailing_bytes()).await?;
    }

    metrics::record_request(&request.method, "tunnel");
    let (sent, received) =
        tunnel::relay(client, target, config.listener.read_buffer_size).await;
    metrics::record_tunnel_bytes(sent, received);

    tracing::info!(
        endpoint = %endpoint,
        bytes_sent = sent,
        bytes_received = received,
        "Tunnel closed"
    );
    Ok(())
}

/// Forwarding branch: serve from cache when possible, otherwise relay the
/// rewritten request to the origin, buffer the full response, cache it if
/// allowed, and send it back verbatim.
async fn forward_to_origin(
    mut client: TcpStream,
    request: &ParsedRequest,
    config: &ProxyConfig,
    cache: &ResponseCache,
) -> Result<(), ProxyError> {
    let url = resolve_url(&request.target, &request.headers)?;
    let key = cache_key(&request.method, url.as_str());

    if request.method == "GET" {
        if let Some(body) = cache.get(&key) {
            tracing::info!(url = %url, "Serving response from cache");
            metrics::record_request(&request.method, "cache_hit");
            client.write_all(&body).await?;
            return Ok(());
        }
    }

    let endpoint = Endpoint::from_url(&url)?;
    let connect_timeout = Duration::from_secs(config.timeouts.connect_secs);
    let mut origin = upstream::dial(&endpoint, connect_timeout).await?;

    let outbound = request.rewrite_for_origin(&Endpoint::origin_form(&url));
    origin.write_all(&outbound).await?;

    // Persistent upstream connections are unsupported by design: the full
    // response is whatever arrives before the origin closes.
    let response = read_until_close(&mut origin, config.listener.read_buffer_size).await?;

    if !response.is_empty() && response_is_cacheable(&request.method, &response) {
        cache.set(&key, response.clone());
        tracing::debug!(key = %key, bytes = response.len(), "Response cached");
    }

    client.write_all(&response).await?;
    metrics::record_request(&request.method, "forwarded");

    tracing::info!(
        url = %url,
        endpoint = %endpoint,
        response_bytes = response.len(),
        "Request forwarded"
    );
    Ok(())
}

/// Apply the cacheability policy to a raw response buffer. A response
/// whose header block cannot be parsed is never cached.
fn response_is_cacheable(method: &str, response: &[u8]) -> bool {
    let head_len = header_end(response).unwrap_or(response.len());
    let head = String::from_utf8_lossy(&response[..head_len]);
    match Headers::parse(&head) {
        Ok(headers) => is_cacheable(method, &headers),
        Err(_) => false,
    }
}
