//! Target resolution.
//!
//! # Responsibilities
//! - Turn a request target (absolute URL or origin-form path + Host
//!   header) into a dialable `host:port`
//! - Turn a CONNECT authority (`host:port`) into the same

use url::Url;

use crate::error::ProxyError;
use crate::wire::request::Headers;

/// A resolved upstream address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Resolve a request target into an absolute URL.
///
/// Absolute targets parse directly; origin-form targets are joined with
/// the `Host` header under the `http` scheme.
pub fn resolve_url(target: &str, headers: &Headers) -> Result<Url, ProxyError> {
    let absolute = if target.contains("://") {
        target.to_string()
    } else {
        let host = headers
            .get("host")
            .ok_or_else(|| ProxyError::InvalidTarget(target.to_string()))?;
        format!("http://{}{}", host, target)
    };
    Url::parse(&absolute).map_err(|_| ProxyError::InvalidTarget(target.to_string()))
}

impl Endpoint {
    /// Host and port of an absolute URL; port defaults to 80 for `http`
    /// and 443 for anything else.
    pub fn from_url(url: &Url) -> Result<Self, ProxyError> {
        let host = url
            .host_str()
            .ok_or_else(|| ProxyError::InvalidTarget(url.as_str().to_string()))?
            .to_string();
        let port = url
            .port()
            .unwrap_or(if url.scheme() == "http" { 80 } else { 443 });
        Ok(Self { host, port })
    }

    /// Parse a CONNECT authority of the form `host:port`; port defaults
    /// to 443 when absent.
    pub fn from_authority(target: &str) -> Result<Self, ProxyError> {
        match target.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| ProxyError::InvalidTarget(target.to_string()))?;
                Ok(Self {
                    host: host.to_string(),
                    port,
                })
            }
            None if !target.is_empty() => Ok(Self {
                host: target.to_string(),
                port: 443,
            }),
            _ => Err(ProxyError::InvalidTarget(target.to_string())),
        }
    }

    /// Origin-form target (path plus query) for the upstream request line.
    pub fn origin_form(url: &Url) -> String {
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }
}
