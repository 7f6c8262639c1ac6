use crate::domain::model::GeocodedAddress;
use crate::domain::ports::GeocodeCache;
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    // Serialized form so a round-trip through the cache behaves exactly like
    // a round-trip through an external store.
    payload: String,
    expires_at: Option<Instant>,
}

/// In-memory implementation of the cache port. Safe to share across tasks;
/// stands in for an external cache service in tests and single-process use.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GeocodeCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<GeocodedAddress>> {
        let mut entries = self.entries.lock().map_err(|e| GeoError::CacheError {
            message: e.to_string(),
        })?;

        let expired = matches!(
            entries.get(key),
            Some(Entry {
                expires_at: Some(deadline),
                ..
            }) if *deadline <= Instant::now()
        );
        if expired {
            entries.remove(key);
            return Ok(None);
        }

        match entries.get(key) {
            Some(entry) => Ok(Some(serde_json::from_str(&entry.payload)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &GeocodedAddress, ttl: Option<Duration>) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);

        let mut entries = self.entries.lock().map_err(|e| GeoError::CacheError {
            message: e.to_string(),
        })?;
        entries.insert(
            key.to_string(),
            Entry {
                payload,
                expires_at,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_preserves_values() {
        let cache = InMemoryCache::new();
        let value = GeocodedAddress::new("100, Main St, Springfield", Some(42.1), Some(-71.3));

        cache.set("123mainst", &value, None).await.unwrap();
        let restored = cache.get("123mainst").await.unwrap().unwrap();
        assert_eq!(restored, value);
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let cache = InMemoryCache::new();
        assert!(cache.get("nothere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted() {
        let cache = InMemoryCache::new();
        let value = GeocodedAddress::new("somewhere", Some(1.0), Some(2.0));

        cache
            .set("short", &value, Some(Duration::from_millis(10)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get("short").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_none_ttl_never_expires() {
        let cache = InMemoryCache::new();
        let value = GeocodedAddress::new("somewhere", Some(1.0), Some(2.0));

        cache.set("forever", &value, None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get("forever").await.unwrap().is_some());
    }
}
