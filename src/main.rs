use std::sync::Arc;

use ding_sync::{
    DingClient,
    cache::{ExpiringCache, RedisCache},
    config::Config,
    users::{self, PgUserStore},
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 设置 Redis 缓存
    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");
    let cache: Arc<dyn ExpiringCache> = Arc::new(RedisCache::new(Arc::new(redis_client)));

    let client = match DingClient::new(config.ding.clone(), cache.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Invalid DingTalk configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 同步钉钉通讯录，失败不重试，等待下一次调度
    if let Err(e) = client.sync_directory().await {
        tracing::error!("DingTalk directory sync failed: {}", e);
        std::process::exit(1);
    }

    // 回写本地用户的 ding_user_id
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, skipping local user backfill");
        return;
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .expect("Failed to connect to Postgres");
    let store = PgUserStore::new(pool);

    if let Err(e) = users::refresh_all(cache.as_ref(), &store).await {
        tracing::error!("Local user backfill failed: {}", e);
        std::process::exit(1);
    }
}
