//! Caching Forward HTTP Proxy
//!
//! # Architecture Overview
//!
//! ```text
//!                ┌──────────────────────────────────────────────────┐
//!                │                  FORWARD PROXY                   │
//!                │                                                  │
//!   Client ─────▶│  net::listener ──▶ proxy::server (accept loop)   │
//!                │                        │  one task per conn      │
//!                │                        ▼                         │
//!                │                  proxy::handler                  │
//!                │                   │     │     │                  │
//!                │        ┌──────────┘     │     └──────────┐       │
//!                │        ▼                ▼                ▼       │
//!                │  wire (parsing,    cache (LRU +    proxy::tunnel │
//!                │  endpoints, I/O)   TTL store)      (CONNECT)     │
//!                │        │                                 │       │
//!                │        ▼                                 │       │
//!                │  proxy::upstream ────────────────────────┼──────▶│── Origin
//!                │                                                  │   Server
//!                │  ┌────────────────────────────────────────────┐  │
//!                │  │           Cross-Cutting Concerns           │  │
//!                │  │   config  │  observability  │  lifecycle   │  │
//!                │  └────────────────────────────────────────────┘  │
//!                └──────────────────────────────────────────────────┘
//! ```
//!
//! Plain HTTP requests are parsed, optionally answered from the response
//! cache, and otherwise relayed to the origin with the full response
//! buffered before it is cached and forwarded. `CONNECT` requests open an
//! opaque bidirectional tunnel. The cache is the only state shared between
//! connections.

// Core subsystems
pub mod cache;
pub mod config;
pub mod net;
pub mod proxy;
pub mod wire;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use cache::ResponseCache;
pub use config::ProxyConfig;
pub use error::ProxyError;
pub use proxy::ProxyServer;
