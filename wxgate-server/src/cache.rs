//! Response cache
//!
//! A blanket time-based cache keyed by the full request signature (path
//! plus raw query string). Entries hold the exact bytes that were sent,
//! so a repeat of the same request inside the window gets a byte-identical
//! body. There is no explicit invalidation; entries simply age out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// A response as it was sent: body bytes plus whether it was served with a
/// JSON content type (the `pp` flag) or as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub body: String,
    pub as_json: bool,
}

struct Entry {
    stored_at: Instant,
    response: CachedResponse,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry. Expired entries are removed on the way.
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.response.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Stale entry found, drop it under a write lock
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.stored_at.elapsed() >= self.ttl {
                entries.remove(key);
            }
        }
        None
    }

    pub async fn put(&self, key: String, response: CachedResponse) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                response,
            },
        );
    }

    /// Drop every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Periodic sweep so entries that are never requested again do not
    /// accumulate.
    pub fn start_sweep_task(self: Arc<Self>) {
        const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

        tokio::task::spawn(async move {
            loop {
                tokio::time::sleep(SWEEP_INTERVAL).await;
                let removed = self.purge_expired().await;
                if removed > 0 {
                    tracing::debug!("Purged {} expired cache entries", removed);
                }
            }
        });
    }
}
