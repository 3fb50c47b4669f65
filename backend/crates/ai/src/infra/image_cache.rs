//! Temporary Image Cache
//!
//! Holds uploaded food photos so the client can show them again via
//! `/temp-image/{id}`. Entries expire after a TTL. The cache is bounded both
//! by entry count and by total image bytes, and evicts the oldest upload
//! first when either bound is exceeded.

use lru::LruCache;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::domain::image::InlineImage;

#[derive(Debug)]
struct Entry {
    image: Arc<InlineImage>,
    inserted_at: Instant,
}

/// Lookups use `peek`, so LRU order stays insertion order
struct State {
    entries: LruCache<String, Entry>,
    current_bytes: usize,
}

impl State {
    fn pop_oldest(&mut self) -> Option<String> {
        let (id, entry) = self.entries.pop_lru()?;
        self.current_bytes = self.current_bytes.saturating_sub(entry.image.data.len());
        Some(id)
    }

    fn prune(&mut self, ttl: Duration, now: Instant) {
        while let Some((_, oldest)) = self.entries.peek_lru()
            && now.saturating_duration_since(oldest.inserted_at) >= ttl
        {
            self.pop_oldest();
        }
    }
}

pub struct TempImageCache {
    ttl: Duration,
    max_entries: usize,
    max_bytes: usize,
    state: Mutex<State>,
}

impl TempImageCache {
    pub fn new(ttl: Duration, max_entries: usize, max_bytes: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            max_bytes,
            state: Mutex::new(State {
                entries: LruCache::unbounded(),
                current_bytes: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store an image and return its id
    pub fn insert(&self, image: Arc<InlineImage>) -> String {
        self.insert_at(image, Instant::now())
    }

    pub fn get(&self, id: &str) -> Option<Arc<InlineImage>> {
        self.get_at(id, Instant::now())
    }

    /// Synchronous core, with the clock passed in
    pub fn insert_at(&self, image: Arc<InlineImage>, now: Instant) -> String {
        let size = image.data.len();
        let mut state = self.lock();
        state.prune(self.ttl, now);

        while !state.entries.is_empty()
            && (state.entries.len() >= self.max_entries
                || state.current_bytes + size > self.max_bytes)
        {
            if let Some(oldest) = state.pop_oldest() {
                tracing::debug!(image_id = %oldest, "Evicted cached image");
            }
        }

        let id = platform::crypto::random_token(16);
        state.current_bytes += size;
        state.entries.put(
            id.clone(),
            Entry {
                image,
                inserted_at: now,
            },
        );
        id
    }

    pub fn get_at(&self, id: &str, now: Instant) -> Option<Arc<InlineImage>> {
        let mut state = self.lock();
        state.prune(self.ttl, now);
        state.entries.peek(id).map(|e| e.image.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes of the cached images
    pub fn size_bytes(&self) -> usize {
        self.lock().current_bytes
    }
}

impl std::fmt::Debug for TempImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TempImageCache")
            .field("ttl", &self.ttl)
            .field("max_entries", &self.max_entries)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: usize = 1024 * 1024;

    fn image(byte: u8, len: usize) -> Arc<InlineImage> {
        Arc::new(InlineImage {
            mime_type: "image/jpeg".into(),
            data: vec![byte; len],
        })
    }

    #[test]
    fn test_insert_and_get() {
        let cache = TempImageCache::new(Duration::from_secs(60), 4, MIB);
        let id = cache.insert(image(1, 1));
        assert_eq!(cache.get(&id).unwrap().data, vec![1]);
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_entries_expire() {
        let cache = TempImageCache::new(Duration::from_secs(60), 4, MIB);
        let start = Instant::now();
        let id = cache.insert_at(image(1, 10), start);

        assert!(cache.get_at(&id, start + Duration::from_secs(59)).is_some());
        assert!(cache.get_at(&id, start + Duration::from_secs(60)).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.size_bytes(), 0);
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let cache = TempImageCache::new(Duration::from_secs(60), 2, MIB);
        let now = Instant::now();
        let first = cache.insert_at(image(1, 1), now);
        let second = cache.insert_at(image(2, 1), now);
        // Reading does not protect an entry from eviction
        assert!(cache.get_at(&first, now).is_some());
        let third = cache.insert_at(image(3, 1), now);

        assert_eq!(cache.len(), 2);
        assert!(cache.get_at(&first, now).is_none());
        assert!(cache.get_at(&second, now).is_some());
        assert!(cache.get_at(&third, now).is_some());
    }

    #[test]
    fn test_byte_budget_evicts_oldest() {
        let cache = TempImageCache::new(Duration::from_secs(60), 256, 100);
        let now = Instant::now();
        let first = cache.insert_at(image(1, 40), now);
        let second = cache.insert_at(image(2, 40), now);
        let third = cache.insert_at(image(3, 40), now);

        assert!(cache.size_bytes() <= 100);
        assert_eq!(cache.size_bytes(), 80);
        assert!(cache.get_at(&first, now).is_none());
        assert!(cache.get_at(&second, now).is_some());
        assert!(cache.get_at(&third, now).is_some());
    }

    #[test]
    fn test_image_larger_than_budget_replaces_everything() {
        let cache = TempImageCache::new(Duration::from_secs(60), 256, 100);
        let now = Instant::now();
        cache.insert_at(image(1, 40), now);
        let big = cache.insert_at(image(2, 150), now);

        assert_eq!(cache.len(), 1);
        assert!(cache.get_at(&big, now).is_some());
    }
}
