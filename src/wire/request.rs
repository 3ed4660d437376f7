//! Request parsing and transformation.
//!
//! # Responsibilities
//! - Split the request line into method, target, and version
//! - Parse the header block into a case-insensitive map
//! - Rewrite a proxied request into origin form for the upstream
//!
//! # Design Decisions
//! - The raw bytes are kept alongside the parsed view; forwarding and
//!   caching always operate on raw bytes, never on a re-serialization
//! - Hop-by-hop proxy headers are stripped before the request travels
//!   upstream

use crate::error::ProxyError;
use crate::wire::io::header_end;

/// Headers stripped from requests before they are forwarded upstream.
const HOP_HEADERS: [&str; 2] = ["proxy-connection", "proxy-authorization"];

/// An order-preserving header map with lowercased keys.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Parse a header block, skipping the first (request or status) line.
    ///
    /// Each non-empty line is split on its first colon; the key is
    /// lowercased and the value trimmed. A line without a colon fails with
    /// [`ProxyError::MalformedHeader`].
    pub fn parse(block: &str) -> Result<Self, ProxyError> {
        let mut entries = Vec::new();
        for line in block.split("\r\n").skip(1) {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ProxyError::MalformedHeader(line.to_string()))?;
            entries.push((name.to_ascii_lowercase(), value.trim().to_string()));
        }
        Ok(Self { entries })
    }

    /// Case-insensitive lookup; returns the first matching value.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split a request line into `(method, target, version)`.
///
/// Exactly three whitespace-separated tokens are required.
pub fn parse_request_line(line: &str) -> Result<(String, String, String), ProxyError> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(target), Some(version), None) => {
            Ok((method.to_string(), target.to_string(), version.to_string()))
        }
        _ => Err(ProxyError::MalformedRequestLine(line.to_string())),
    }
}

/// One inbound request, parsed once and immutable thereafter.
#[derive(Debug)]
pub struct ParsedRequest {
    pub method: String,
    pub target: String,
    pub version: String,
    pub headers: Headers,
    /// The bytes exactly as received from the client.
    pub raw: Vec<u8>,
    /// Length of the head (request line + headers + terminator) within
    /// `raw`; anything past it was read eagerly and belongs to the body
    /// or tunnel.
    head_len: usize,
}

impl ParsedRequest {
    /// Parse the head of a raw request buffer.
    pub fn parse(raw: Vec<u8>) -> Result<Self, ProxyError> {
        let head_len = header_end(&raw).unwrap_or(raw.len());
        let head = String::from_utf8_lossy(&raw[..head_len]).into_owned();

        let request_line = head.split("\r\n").next().unwrap_or_default();
        let (method, target, version) = parse_request_line(request_line)?;
        let headers = Headers::parse(&head)?;

        Ok(Self {
            method,
            target,
            version,
            headers,
            raw,
            head_len,
        })
    }

    /// Bytes the client sent past the end of the header block.
    pub fn trailing_bytes(&self) -> &[u8] {
        &self.raw[self.head_len..]
    }

    /// Reassemble the request for the origin server: the target is
    /// replaced with `origin_form_target` (path + query, no scheme or
    /// host) and proxy hop headers are dropped. Any body bytes already
    /// received are carried over untouched.
    pub fn rewrite_for_origin(&self, origin_form_target: &str) -> Vec<u8> {
        let head = String::from_utf8_lossy(&self.raw[..self.head_len]);

        let mut rewritten = format!(
            "{} {} {}\r\n",
            self.method, origin_form_target, self.version
        )
        .into_bytes();

        for line in head.split("\r\n").skip(1) {
            if line.is_empty() {
                continue;
            }
            let name = line
                .split_once(':')
                .map(|(name, _)| name.trim().to_ascii_lowercase())
                .unwrap_or_default();
            if HOP_HEADERS.contains(&name.as_str()) {
                continue;
            }
            rewritten.extend_from_slice(line.as_bytes());
            rewritten.extend_from_slice(b"\r\n");
        }
        rewritten.extend_from_slice(b"\r\n");
        rewritten.extend_from_slice(self.trailing_bytes());
        rewritten
    }
}
