use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bytes::Bytes;

/// How long a downloaded photo is served from memory before it is refetched.
pub const PHOTO_TTL: Duration = Duration::from_secs(60 * 60);

/// Source of "now" for cache expiry. Injected so tests can move time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
pub struct CachedPhoto {
    pub bytes: Bytes,
    pub content_type: String,
    pub fetched_at: Instant,
}

/// In-process photo cache keyed by profile id.
///
/// Expiry is lazy: a stale entry is ignored on read and overwritten by the
/// next successful fetch. Nothing else is ever evicted, so the map grows with
/// the number of distinct ids requested during the process lifetime.
///
/// The lock only covers the map operation. Two concurrent misses for the same
/// id both go to the file host and the later insert wins.
pub struct PhotoCache {
    entries: Mutex<HashMap<i64, CachedPhoto>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl PhotoCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, PHOTO_TTL)
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    /// Fresh entry for `user_id`, if any.
    pub fn get(&self, user_id: i64) -> Option<CachedPhoto> {
        let now = self.clock.now();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&user_id)
            .filter(|photo| now.saturating_duration_since(photo.fetched_at) < self.ttl)
            .cloned()
    }

    /// Store a freshly downloaded photo, replacing any previous entry.
    pub fn insert(&self, user_id: i64, bytes: Bytes, content_type: String) -> CachedPhoto {
        let photo = CachedPhoto {
            bytes,
            content_type,
            fetched_at: self.clock.now(),
        };
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user_id, photo.clone());
        photo
    }

    /// Entries held, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
