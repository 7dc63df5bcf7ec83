use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

const IDLE_SWEEP_THRESHOLD: usize = 4096;

/// Per-key single-flight guard: concurrent cache misses for the same key
/// serialize so the response is computed once while the rest wait and then
/// hit the freshly filled cache.
pub struct RequestCoalescer {
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RequestCoalescer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut inflight = self.inflight.lock().await;
            if inflight.len() > IDLE_SWEEP_THRESHOLD {
                // Locks nobody holds are just map growth; drop them.
                inflight.retain(|_, v| Arc::strong_count(v) > 1);
            }
            Arc::clone(
                inflight
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}

impl Default for RequestCoalescer {
    fn default() -> Self {
        Self::new()
    }
}
