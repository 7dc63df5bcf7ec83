use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct CachedResponse {
    pub body: Vec<u8>,
    pub etag: String,
    created_at: Instant,
    ttl: Duration,
}

impl CachedResponse {
    fn expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// In-process response cache with per-entry TTLs.
///
/// A disabled cache turns every operation into a silent no-op: caching is
/// an optimization, never a correctness dependency, and must not fail the
/// caller.
pub struct ResponseCache {
    enabled: bool,
    max_entries: usize,
    entries: HashMap<String, CachedResponse>,
}

impl ResponseCache {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            enabled: true,
            max_entries,
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_entries: 0,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<CachedResponse> {
        if !self.enabled {
            return None;
        }
        self.entries.retain(|_, v| !v.expired());
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, body: Vec<u8>, etag: String, ttl: Duration) {
        if !self.enabled {
            return;
        }
        self.entries.retain(|_, v| !v.expired());
        if self.entries.len() >= self.max_entries {
            if let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, v)| v.created_at)
                .map(|(k, _)| k.clone())
            {
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(
            key,
            CachedResponse {
                body,
                etag,
                created_at: Instant::now(),
                ttl,
            },
        );
    }

    pub fn remove(&mut self, key: &str) -> usize {
        usize::from(self.entries.remove(key).is_some())
    }

    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| !k.starts_with(prefix));
        before - self.entries.len()
    }

    pub fn clear(&mut self) -> usize {
        let purged = self.entries.len();
        self.entries.clear();
        purged
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
