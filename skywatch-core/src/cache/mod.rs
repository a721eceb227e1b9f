pub mod gate;
pub mod status_cache;

pub use gate::NotificationGate;
pub use status_cache::{CacheEntry, StatusCache, STATUS_CACHE_TTL_MS};
