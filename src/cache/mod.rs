// 缓存模块
// 令牌与用户名映射都写入同一个带过期时间的键值存储

use async_trait::async_trait;

use crate::error::DingResult;

pub mod keys;
pub mod memory;
pub mod models;
pub mod redis_cache;

pub use memory::MemoryCache;
pub use models::CachedAccessToken;
pub use redis_cache::RedisCache;

/// 带过期时间的键值存储，语义对应 GET / SETEX
#[async_trait]
pub trait ExpiringCache: Send + Sync {
    async fn get(&self, key: &str) -> DingResult<Option<String>>;

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> DingResult<()>;
}
