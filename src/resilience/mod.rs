//! Resilience helpers.
//!
//! # Design Decisions
//! - Only read-only RPC calls are retried; deployment transactions never are
//! - Every external call has a deadline (see `blockchain::client`)

pub mod backoff;

pub use backoff::Backoff;
