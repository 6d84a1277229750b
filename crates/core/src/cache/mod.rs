//! In-memory read-through cache for content fetched from the CMS.
//!
//! Entries live for the process lifetime only. Expiry is evaluated lazily
//! when a key is read; there is no background sweeper.
//!
//! - One entry per key, overwritten wholesale on refresh
//! - Stale entries are served when a refresh fails
//! - No request coalescing: concurrent cold misses each call the fetcher

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheEntry, CacheStore, DEFAULT_TTL};
