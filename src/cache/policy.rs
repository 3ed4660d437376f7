//! Cacheability policy.

use crate::wire::request::Headers;

/// Cache-Control directives that forbid storing a response.
const UNCACHEABLE_DIRECTIVES: [&str; 3] = ["no-store", "private", "max-age=0"];

/// Key under which a response is stored and looked up.
pub fn cache_key(method: &str, url: &str) -> String {
    format!("{}:{}", method, url)
}

/// Whether a response may be stored: only GET responses, and only when
/// the response's `Cache-Control` carries none of the forbidding
/// directives.
pub fn is_cacheable(method: &str, response_headers: &Headers) -> bool {
    if method != "GET" {
        return false;
    }
    match response_headers.get("cache-control") {
        None => true,
        Some(value) => {
            let value = value.to_ascii_lowercase();
            !UNCACHEABLE_DIRECTIVES
                .iter()
                .any(|directive| value.contains(directive))
        }
    }
}
