use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::ExpiringCache;
use crate::error::DingResult;

struct Entry {
    value: String,
    ttl_secs: u64,
    expires_at: Instant,
}

/// 进程内缓存，单进程运行或测试时替代 Redis
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次写入时指定的 TTL，过期或不存在时返回 None
    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.ttl_secs)
    }

    /// 未过期条目数
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.values().filter(|entry| entry.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExpiringCache for MemoryCache {
    async fn get(&self, key: &str) -> DingResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        }
        // 过期即删除
        entries.remove(key);
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> DingResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                ttl_secs,
                expires_at: Instant::now() + Duration::from_secs(ttl_secs),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_ex_overwrites_previous_value() {
        let cache = MemoryCache::new();
        cache.set_ex("k", "v1", 60).await.unwrap();
        cache.set_ex("k", "v2", 120).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(cache.ttl_of("k"), Some(120));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn zero_ttl_entry_is_never_returned() {
        let cache = MemoryCache::new();
        cache.set_ex("k", "v", 0).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty());
    }
}
