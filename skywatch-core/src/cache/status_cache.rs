// File: src/cache/status_cache.rs

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use skywatch_common::models::{PlayerUuid, StatusPayload};

/// How long a fetched status is reused before Hypixel is asked again.
pub const STATUS_CACHE_TTL_MS: i64 = 300_000;

/// Last successful status response for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub payload: StatusPayload,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at < ttl
    }
}

/// One entry per player, replaced on every successful fetch. The key set is
/// bounded by the configured player list so nothing is ever evicted.
#[derive(Debug, Clone)]
pub struct StatusCache {
    entries: HashMap<PlayerUuid, CacheEntry>,
    ttl: Duration,
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::milliseconds(STATUS_CACHE_TTL_MS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, uuid: &PlayerUuid) -> Option<&CacheEntry> {
        self.entries.get(uuid)
    }

    pub fn put(&mut self, uuid: PlayerUuid, payload: StatusPayload, now: DateTime<Utc>) {
        self.entries.insert(
            uuid,
            CacheEntry {
                payload,
                fetched_at: now,
            },
        );
    }

    pub fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        entry.is_fresh(now, self.ttl)
    }

    /// The cached payload for `uuid`, if one exists and has not expired.
    pub fn fresh_payload(&self, uuid: &PlayerUuid, now: DateTime<Utc>) -> Option<&StatusPayload> {
        self.get(uuid)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| &entry.payload)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
