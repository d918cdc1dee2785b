use std::collections::BTreeSet;

use tracing::{debug, instrument};

use super::models::DeptListIdsResponse;
use super::{AccessToken, DingClient};
use crate::error::DingResult;

impl DingClient {
    /// 获取部门的直属子部门 id
    pub async fn list_sub_dept_ids(
        &self,
        token: &AccessToken,
        dept_id: i64,
    ) -> DingResult<Vec<i64>> {
        let id = dept_id.to_string();
        let resp: DeptListIdsResponse = self
            .oapi_get(
                "/department/list_ids",
                &[("id", id.as_str()), ("access_token", token.as_str())],
            )
            .await?;
        Ok(resp.sub_dept_id_list)
    }

    /// 获取部门自身及全部下级部门 id
    ///
    /// 用显式栈代替递归，已访问的部门不会重复请求，遇到环也能终止。
    /// 任一请求失败即整体失败，不返回部分结果。
    #[instrument(skip(self, token))]
    pub async fn resolve_descendant_ids(
        &self,
        token: &AccessToken,
        root_dept_id: i64,
    ) -> DingResult<BTreeSet<i64>> {
        let mut resolved = BTreeSet::new();
        let mut pending = vec![root_dept_id];

        while let Some(dept_id) = pending.pop() {
            if !resolved.insert(dept_id) {
                continue;
            }
            let children = self.list_sub_dept_ids(token, dept_id).await?;
            pending.extend(children.into_iter().filter(|id| !resolved.contains(id)));
        }

        debug!(count = resolved.len(), "Resolved department tree");
        Ok(resolved)
    }
}
