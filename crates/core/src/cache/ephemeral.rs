//! Ephemeral tier: a TTL key-value store for recently produced results.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use crate::Error;

/// Key-value store with per-entry expiry.
///
/// Keys are normalized URLs and values are encoded `ScrapeResult`s.
/// An expired entry reads as absent.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), Error>;
}

#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// In-process ephemeral store.
///
/// Bounded by `max_entries`; when full, the least recently used entry is
/// evicted. Expired entries are dropped when read. Clones share the same cache.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<LruCache<String, Entry>>>,
}

impl MemoryStore {
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self { entries: Arc::new(Mutex::new(LruCache::new(capacity))) }
    }

    /// Number of stored entries, expired ones not yet read included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drop every expired entry and return how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        expired.len()
    }
}

#[async_trait]
impl EphemeralStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), Error> {
        let mut entries = self.entries.lock().await;
        entries.put(key.to_string(), Entry { value, stored_at: Instant::now(), ttl });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(86_400);

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new(10);
        store.set("https://example.com/", b"value".to_vec(), DAY).await.unwrap();

        let value = store.get("https://example.com/").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"value"[..]));
        assert!(store.get("https://other.example/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let store = MemoryStore::new(10);
        store.set("https://example.com/", b"stale".to_vec(), Duration::ZERO).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.get("https://example.com/").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = MemoryStore::new(10);
        store.set("https://a.example/", b"a".to_vec(), Duration::ZERO).await.unwrap();
        store.set("https://b.example/", b"b".to_vec(), DAY).await.unwrap();

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("https://b.example/").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_set_overwrites_value() {
        let store = MemoryStore::new(10);
        store.set("https://example.com/", b"one".to_vec(), DAY).await.unwrap();
        store.set("https://example.com/", b"two".to_vec(), DAY).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("https://example.com/").await.unwrap().as_deref(), Some(&b"two"[..]));
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let store = MemoryStore::new(3);
        for i in 0..5 {
            store.set(&format!("https://example.com/{i}"), vec![i as u8], DAY).await.unwrap();
        }

        assert_eq!(store.len().await, 3);
        assert!(store.get("https://example.com/0").await.unwrap().is_none());
        assert!(store.get("https://example.com/1").await.unwrap().is_none());
        assert!(store.get("https://example.com/4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_read_keeps_entry_from_eviction() {
        let store = MemoryStore::new(2);
        store.set("https://a.example/", b"a".to_vec(), DAY).await.unwrap();
        store.set("https://b.example/", b"b".to_vec(), DAY).await.unwrap();

        assert!(store.get("https://a.example/").await.unwrap().is_some());
        store.set("https://c.example/", b"c".to_vec(), DAY).await.unwrap();

        assert!(store.get("https://a.example/").await.unwrap().is_some());
        assert!(store.get("https://b.example/").await.unwrap().is_none());
        assert!(store.get("https://c.example/").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_holds_one_entry() {
        let store = MemoryStore::new(0);
        store.set("https://a.example/", b"a".to_vec(), DAY).await.unwrap();
        store.set("https://b.example/", b"b".to_vec(), DAY).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
