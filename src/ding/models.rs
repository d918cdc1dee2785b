use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeptListIdsResponse {
    #[serde(default)]
    pub sub_dept_id_list: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeptMemberResponse {
    #[serde(default, rename = "userIds")]
    pub user_ids: Vec<String>,
}

/// user/get 返回的用户详情，保留全部字段以便按配置取用户名对应字段
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct DingUser {
    fields: Map<String, Value>,
}

impl DingUser {
    pub fn userid(&self) -> Option<&str> {
        self.fields.get("userid").and_then(Value::as_str)
    }

    pub fn unionid(&self) -> Option<&str> {
        self.fields
            .get("unionid")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// 取字符串或数字字段，空值视为缺失
    pub fn field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateTodoBody {
    pub subject: String,
    pub creator_id: String,
    pub executor_ids: Vec<String>,
    pub detail_url: DetailUrl,
    pub is_only_show_executor: bool,
    pub priority: u8,
    pub notify_configs: NotifyConfigs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DetailUrl {
    pub app_url: String,
    pub pc_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NotifyConfigs {
    pub ding_notify: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateTodoResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateTodoBody {
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateTodoResponse {
    #[serde(default)]
    pub result: bool,
}
