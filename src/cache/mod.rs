//! Response cache subsystem.
//!
//! # Data Flow
//! ```text
//! handler GET lookup ──▶ store.rs (single-mutex LRU + TTL store)
//!                             │ expired on read → removed, miss
//! handler forward done ──▶ policy.rs (is the response cacheable?)
//!                             │ yes → store.rs set (evict LRU if full)
//! background            ──▶ sweeper.rs (periodic expired-entry purge)
//! ```
//!
//! # Design Decisions
//! - One mutex serializes every operation; check-expire-promote and
//!   remove-evict-insert are atomic sequences
//! - Read-path expiry is authoritative; the sweeper only bounds how long
//!   an expired entry can occupy capacity

pub mod entry;
pub mod policy;
pub mod store;
pub mod sweeper;

pub use entry::CacheEntry;
pub use policy::{cache_key, is_cacheable};
pub use store::ResponseCache;
