use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// In-memory TTL cache for a single clonable value that keeps expired
/// entries around so callers can fall back to the last known value when a
/// refresh attempt fails.
///
/// The entry is only ever replaced by [`StaleCache::store`]; it is never
/// deleted. A cache that has expired still answers [`StaleCache::last_known`]
/// with the old value, it just stops answering [`StaleCache::fresh`].
pub struct StaleCache<T: Clone> {
    entry: Option<Entry<T>>,
    ttl: Duration,
}

struct Entry<T> {
    payload: T,
    // Monotonic clock drives the freshness check; the wall-clock twin is
    // what HTTP headers and operators get to see.
    fetched_at: Instant,
    fetched_at_utc: DateTime<Utc>,
}

impl<T: Clone> StaleCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// Returns the cached value only while it is within the freshness window.
    pub fn fresh(&self) -> Option<T> {
        if self.is_fresh() {
            self.entry.as_ref().map(|entry| entry.payload.clone())
        } else {
            None
        }
    }

    /// Returns the last stored value regardless of age.
    pub fn last_known(&self) -> Option<T> {
        self.entry.as_ref().map(|entry| entry.payload.clone())
    }

    /// Replace the entry with a freshly fetched value, resetting its age.
    pub fn store(&mut self, payload: T) {
        self.entry = Some(Entry {
            payload,
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        });
    }

    pub fn is_fresh(&self) -> bool {
        self.entry
            .as_ref()
            .map(|entry| entry.fetched_at.elapsed() < self.ttl)
            .unwrap_or(false)
    }

    /// Wall-clock time of the last successful refresh, if any.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|entry| entry.fetched_at_utc)
    }
}
