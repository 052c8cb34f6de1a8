//! In-process TTL cache for composed feed pages.
//!
//! A small namespaced key/value layer with lazy expiry: entries are only
//! checked for staleness when read, there is no background eviction. The
//! cache never surfaces errors — a corrupt or unreadable entry degrades to
//! a miss, which callers handle by recomputing.
//!
//! The store and the clock are both injected so tests can drive expiry
//! without sleeping and independent cache scopes don't share state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use meetral_domain::time::Timestamp;

use crate::ports::Clock;

/// Prefix distinguishing this cache's keys from other users of a shared
/// store.
pub const NAMESPACE: &str = "meetral_feed_";

/// Time-to-live in seconds. Entries older than this are treated as
/// missing and deleted on read.
pub const TTL_SECONDS: i64 = 3 * 60;

/// Backing key/value substrate for [`TtlCache`].
///
/// Reads and removals are infallible (a failed read is a miss); writes may
/// fail (a full or broken store) and the cache swallows and logs that.
pub trait CacheStore {
    /// Read the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate rejects the write.
    fn write(&self, key: &str, value: String) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Remove the entry under `key`, if any.
    fn remove(&self, key: &str);

    /// All stored keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

/// Shared in-memory store.
///
/// The map sits behind a `Mutex` because the server handles concurrent
/// requests; the remaining get-check-then-set race between two requests
/// only causes a redundant recompute, never a stale read beyond the TTL.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: String) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries.lock().map_or_else(
            |_| Vec::new(),
            |entries| {
                entries
                    .keys()
                    .filter(|k| k.starts_with(prefix))
                    .cloned()
                    .collect()
            },
        )
    }
}

/// Stored envelope: the payload plus its write time.
#[derive(Serialize, Deserialize)]
struct Entry {
    data: serde_json::Value,
    timestamp: Timestamp,
}

/// Namespaced key/value cache with a fixed time-to-live.
#[derive(Debug, Clone)]
pub struct TtlCache<S, C> {
    store: S,
    clock: C,
}

impl<S: CacheStore, C: Clock> TtlCache<S, C> {
    /// Create a cache over the given store and clock.
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Get the payload stored under `key`, if present and fresh.
    ///
    /// Stale or undecodable entries are deleted and reported as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let full_key = Self::full_key(key);
        let raw = self.store.read(&full_key)?;

        let Ok(entry) = serde_json::from_str::<Entry>(&raw) else {
            tracing::warn!(key, "dropping undecodable cache entry");
            self.store.remove(&full_key);
            return None;
        };

        if self.clock.now() - entry.timestamp > Duration::seconds(TTL_SECONDS) {
            tracing::debug!(key, "cache entry expired");
            self.store.remove(&full_key);
            return None;
        }

        match serde_json::from_value(entry.data) {
            Ok(data) => {
                tracing::debug!(key, "cache hit");
                Some(data)
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "cache payload did not match requested type");
                self.store.remove(&full_key);
                None
            }
        }
    }

    /// Store `data` under `key`, overwriting any existing entry.
    ///
    /// Serialization or store failures are logged and swallowed — callers
    /// never need to handle a cache write error.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) {
        let data = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to serialize cache payload");
                return;
            }
        };
        let entry = Entry {
            data,
            timestamp: self.clock.now(),
        };
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to serialize cache entry");
                return;
            }
        };
        if let Err(err) = self.store.write(&Self::full_key(key), raw) {
            tracing::warn!(key, error = %err, "cache store rejected write");
        }
    }

    /// Remove one entry, or every entry in this cache's namespace when
    /// `key` is `None`. Unrelated keys in a shared store are untouched.
    pub fn clear(&self, key: Option<&str>) {
        if let Some(key) = key {
            self.store.remove(&Self::full_key(key));
        } else {
            for full_key in self.store.keys_with_prefix(NAMESPACE) {
                self.store.remove(&full_key);
            }
        }
    }

    fn full_key(key: &str) -> String {
        format!("{NAMESPACE}{key}")
    }
}
