use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use super::ExpiringCache;
use crate::error::DingResult;

/// 基于 Redis 的共享缓存
#[derive(Clone)]
pub struct RedisCache {
    redis: Arc<RedisClient>,
}

impl RedisCache {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl ExpiringCache for RedisCache {
    async fn get(&self, key: &str) -> DingResult<Option<String>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let result: Option<String> = conn.get(key).await?;
        Ok(result)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> DingResult<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl_secs).await?;
        Ok(())
    }
}
