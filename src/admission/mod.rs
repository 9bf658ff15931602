//! Token-bucket admission control for the `/api` surface.
//!
//! Every client key owns one [`Bucket`]. Buckets refill continuously and are
//! evaluated lazily when a request arrives, so there is no background refill
//! timer. The keyed [`Buckets`] store is owned by whoever builds the server
//! and handed to the [`Admission`] middleware explicitly.
//!
//! - [`Bucket`]: Refill and check-and-decrement for one key
//! - [`Buckets`]: Concurrent keyed store with TTL eviction
//! - [`Verdict`]: Allow or reject, plus the quota headers to attach
//! - [`ClientKey`]: Forwarded-address key resolution
//! - [`Admission`]: actix-web middleware wrapping the store
mod bucket;
mod buckets;
mod config;
mod key;
#[cfg(feature = "server")]
mod middleware;
mod sweeper;
mod verdict;

pub use bucket::*;
pub use buckets::*;
pub use config::*;
pub use key::*;
#[cfg(feature = "server")]
pub use middleware::*;
pub use sweeper::*;
pub use verdict::*;
