//! Framed socket reads.
//!
//! # Responsibilities
//! - Read a request up to the end-of-headers marker or peer close
//! - Read a full upstream response until the origin closes
//!
//! # Design Decisions
//! - Reads go through a caller-sized buffer; nothing is buffered beyond it
//!   between reads
//! - A transport error surfaces as the error alone, never a partial buffer

use tokio::io::{AsyncRead, AsyncReadExt};

/// Marker separating the header block from the body.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Index just past the end-of-headers marker, if present.
pub fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
        .map(|i| i + HEADER_TERMINATOR.len())
}

/// Read from `conn` until the end-of-headers marker is seen or the peer
/// closes. Returns an empty buffer on immediate close.
pub async fn read_request<R>(conn: &mut R, buffer_size: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = vec![0u8; buffer_size];
    let mut received = Vec::new();

    loop {
        let n = conn.read(&mut chunk).await?;
        if n == 0 {
            return Ok(received);
        }
        // Only the tail can complete a terminator that spans two reads.
        let scan_from = received.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        received.extend_from_slice(&chunk[..n]);
        if header_end(&received[scan_from..]).is_some() {
            return Ok(received);
        }
    }
}

/// Read from `conn` until a zero-length read, collecting everything.
pub async fn read_until_close<R>(conn: &mut R, buffer_size: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = vec![0u8; buffer_size];
    let mut received = Vec::new();

    loop {
        let n = conn.read(&mut chunk).await?;
        if n == 0 {
            return Ok(received);
        }
        received.extend_from_slice(&chunk[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn header_end_finds_marker() {
        assert_eq!(header_end(b"GET / HTTP/1.1\r\n\r\n"), Some(18));
        assert_eq!(header_end(b"GET / HTTP/1.1\r\n"), None);
        assert_eq!(header_end(b""), None);
    }

    #[tokio::test]
    async fn read_request_stops_at_terminator() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        client
            .write_all(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n")
            .await
            .unwrap();

        let received = read_request(&mut server, 16).await.unwrap();
        assert!(received.ends_with(HEADER_TERMINATOR));
        assert!(received.starts_with(b"GET /"));
    }

    #[tokio::test]
    async fn read_request_empty_on_immediate_close() {
        let (client, mut server) = tokio::io::duplex(1024);
        drop(client);

        let received = read_request(&mut server, 16).await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn read_request_handles_terminator_split_across_reads() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        // Buffer size of 5 forces the terminator to straddle two reads.
        client
            .write_all(b"GET / HTTP/1.1\r\n\r\n")
            .await
            .unwrap();

        let received = read_request(&mut server, 5).await.unwrap();
        assert!(received.ends_with(HEADER_TERMINATOR));
    }

    #[tokio::test]
    async fn read_until_close_collects_everything() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        tokio::spawn(async move {
            client.write_all(b"part one ").await.unwrap();
            client.write_all(b"part two").await.unwrap();
            // client drops here, closing the stream
        });

        let received = read_until_close(&mut server, 4).await.unwrap();
        assert_eq!(received, b"part one part two");
    }
}
