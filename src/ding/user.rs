use tracing::instrument;

use super::models::{DeptMemberResponse, DingUser};
use super::{AccessToken, DingClient};
use crate::error::{DingError, DingResult};

impl DingClient {
    /// 获取部门成员 userid 列表
    pub async fn get_dept_member_ids(
        &self,
        token: &AccessToken,
        dept_id: i64,
    ) -> DingResult<Vec<String>> {
        let id = dept_id.to_string();
        let resp: DeptMemberResponse = self
            .oapi_get(
                "/user/getDeptMember",
                &[("access_token", token.as_str()), ("deptId", id.as_str())],
            )
            .await?;
        Ok(resp.user_ids)
    }

    pub async fn get_user(&self, token: &AccessToken, userid: &str) -> DingResult<DingUser> {
        self.oapi_get(
            "/user/get",
            &[("access_token", token.as_str()), ("userid", userid)],
        )
        .await
    }

    /// 通过 userid 获取 unionid
    #[instrument(skip(self))]
    pub async fn resolve_union_id(&self, userid: &str) -> DingResult<String> {
        let token = self.get_access_token().await?;
        let user = self.get_user(&token, userid).await?;
        user.unionid()
            .map(str::to_string)
            .ok_or_else(|| DingError::NotFound(format!("钉钉用户 {} 没有 unionid", userid)))
    }
}
