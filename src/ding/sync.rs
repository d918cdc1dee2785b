use std::collections::BTreeSet;

use tracing::{info, instrument, warn};

use super::DingClient;
use crate::cache::keys::{USER_ID_TTL_SECS, user_id_key};
use crate::error::DingResult;

/// 一次同步的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub departments: usize,
    pub members: usize,
    pub mapped: usize,
    pub skipped: usize,
}

impl DingClient {
    /// 同步钉钉通讯录，写入 用户名 -> 钉钉 userid 映射
    ///
    /// 本地用户名对应钉钉用户信息中的某个字段（如 jobnumber），字段名由配置决定。
    /// 缺少该字段的用户只记录警告并跳过；接口或网络错误立即中止本次同步，
    /// 已写入的映射保留，重试即重新完整执行一次。
    #[instrument(skip(self))]
    pub async fn sync_directory(&self) -> DingResult<SyncReport> {
        let root_ids = self.config.root_dept_ids()?;
        let username_field = self.config.username_field.as_str();
        let token = self.get_access_token().await?;

        let mut dept_ids = BTreeSet::new();
        for root_id in root_ids {
            dept_ids.extend(self.resolve_descendant_ids(&token, root_id).await?);
        }

        let mut member_ids = BTreeSet::new();
        for dept_id in &dept_ids {
            member_ids.extend(self.get_dept_member_ids(&token, *dept_id).await?);
        }

        let mut report = SyncReport {
            departments: dept_ids.len(),
            members: member_ids.len(),
            ..Default::default()
        };

        for member_id in &member_ids {
            let user = self.get_user(&token, member_id).await?;
            let Some(username) = user.field(username_field) else {
                warn!(
                    userid = %member_id,
                    field = username_field,
                    "DingTalk user lacks the username field, check DING_USERNAME_FIELD"
                );
                report.skipped += 1;
                continue;
            };

            let ding_user_id = user.userid().unwrap_or(member_id.as_str());
            self.cache
                .set_ex(&user_id_key(&username), ding_user_id, USER_ID_TTL_SECS)
                .await?;
            report.mapped += 1;
        }

        info!(
            departments = report.departments,
            members = report.members,
            mapped = report.mapped,
            skipped = report.skipped,
            "DingTalk directory sync finished"
        );
        Ok(report)
    }
}
