//! Bidirectional byte relay for CONNECT tunnels.
//!
//! # Responsibilities
//! - Forward bytes between two established connections until both sides
//!   are done
//! - Keep memory bounded to one read buffer per direction
//!
//! # Design Decisions
//! - Two independent loops: a zero-length read or transport error ends
//!   one direction without ending the other
//! - The relay is a join point: it returns only after both loops finish

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

/// Relay bytes between `client` and `upstream` until both directions
/// have ended. Returns the totals forwarded (client→upstream,
/// upstream→client).
pub async fn relay(client: TcpStream, upstream: TcpStream, buffer_size: usize) -> (u64, u64) {
    let (client_read, client_write) = client.into_split();
    let (upstream_read, upstream_write) = upstream.into_split();

    let to_upstream = tokio::spawn(pump(client_read, upstream_write, buffer_size));
    let to_client = tokio::spawn(pump(upstream_read, client_write, buffer_size));

    let sent = to_upstream.await.unwrap_or(0);
    let received = to_client.await.unwrap_or(0);
    (sent, received)
}

/// Forward reads from `from` into `to` until EOF or a transport error on
/// either side. Half-closes the destination on the way out so the peer
/// sees EOF.
async fn pump<R, W>(mut from: R, mut to: W, buffer_size: usize) -> u64
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = match from.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(error) => {
                tracing::debug!(error = %error, "tunnel read ended");
                break;
            }
        };
        if let Err(error) = to.write_all(&buffer[..n]).await {
            tracing::debug!(error = %error, "tunnel write ended");
            break;
        }
        total += n as u64;
    }

    let _ = to.shutdown().await;
    total
}
