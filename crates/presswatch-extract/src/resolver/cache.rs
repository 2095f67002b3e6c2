//! TTL cache for resolved Google News URLs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::Resolution;

const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_MAX_ENTRIES: usize = 512;

#[derive(Debug)]
struct CacheEntry {
    resolution: Resolution,
    inserted_at: Instant,
}

/// Resolutions keyed by the original Google News URL.
///
/// Expired entries are dropped on read. Failures are never inserted; the
/// resolver only caches successful resolutions.
#[derive(Debug)]
pub struct ResolutionCache {
    ttl: Duration,
    max_entries: usize,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

impl ResolutionCache {
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh entry for `url`, marked `cached: true`. Expired entries are
    /// removed and reported as misses.
    pub fn get(&self, url: &str) -> Option<Resolution> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let expired = entries
            .get(url)
            .is_some_and(|entry| entry.inserted_at.elapsed() >= self.ttl);
        if expired {
            entries.remove(url);
            return None;
        }

        entries.get(url).map(|entry| Resolution {
            cached: true,
            ..entry.resolution.clone()
        })
    }

    /// Insert a successful resolution, evicting the oldest entry once the
    /// cap is reached.
    pub fn insert(&self, url: &str, resolution: &Resolution) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if entries.len() >= self.max_entries && !entries.contains_key(url) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                entries.remove(&key);
            }
        }

        entries.insert(
            url.to_string(),
            CacheEntry {
                resolution: Resolution {
                    cached: false,
                    ..resolution.clone()
                },
                inserted_at: Instant::now(),
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
