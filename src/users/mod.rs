// 本地用户与钉钉 userid 的回写

mod store;

pub use store::{PgUserStore, UserStore};

use tracing::{debug, error, info, instrument};

use crate::cache::ExpiringCache;
use crate::cache::keys::user_id_key;
use crate::error::DingResult;

/// 批量回写的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BackfillReport {
    pub checked: usize,
    pub updated: usize,
    pub failed: usize,
}

/// 用缓存中的映射更新单个用户的 ding_user_id，有变更时返回 true
#[instrument(skip(cache, store))]
pub async fn refresh_ding_user_id(
    cache: &dyn ExpiringCache,
    store: &dyn UserStore,
    username: &str,
) -> DingResult<bool> {
    let Some(ding_user_id) = cache.get(&user_id_key(username)).await? else {
        debug!("No cached DingTalk user id");
        return Ok(false);
    };

    let current = store.ding_user_id(username).await?;
    if current.as_deref() == Some(ding_user_id.as_str()) {
        return Ok(false);
    }

    store.set_ding_user_id(username, &ding_user_id).await?;
    Ok(true)
}

/// 回写全部本地用户，单个用户失败只记录日志
pub async fn refresh_all(
    cache: &dyn ExpiringCache,
    store: &dyn UserStore,
) -> DingResult<BackfillReport> {
    let mut report = BackfillReport::default();

    for username in store.list_usernames().await? {
        report.checked += 1;
        match refresh_ding_user_id(cache, store, &username).await {
            Ok(true) => report.updated += 1,
            Ok(false) => {}
            Err(e) => {
                error!(%username, "Failed to update ding_user_id: {}", e);
                report.failed += 1;
            }
        }
    }

    info!(
        checked = report.checked,
        updated = report.updated,
        failed = report.failed,
        "Local ding_user_id backfill finished"
    );
    Ok(report)
}
