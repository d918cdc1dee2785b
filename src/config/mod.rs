use std::collections::BTreeSet;
use std::env;
use std::time::Duration;

use crate::error::{DingError, DingResult};

const DEFAULT_OAPI_BASE_URL: &str = "https://oapi.dingtalk.com";
const DEFAULT_API_BASE_URL: &str = "https://api.dingtalk.com";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub database_url: Option<String>,
    pub ding: DingConfig,
}

/// 钉钉应用配置
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DingConfig {
    pub app_key: String,
    pub app_secret: String,
    /// 逗号分隔的根部门 id
    pub dept_ids: String,
    /// 钉钉用户信息中与本地用户名对应的字段，例如 jobnumber
    pub username_field: String,
    pub oapi_base_url: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub todo_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            redis_url: env::var("REDIS_URL")?,
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            ding: DingConfig {
                app_key: env::var("DING_APP_KEY")?,
                app_secret: env::var("DING_APP_SECRET")?,
                dept_ids: env::var("DING_DEPT_IDS")?,
                username_field: env::var("DING_USERNAME_FIELD")?,
                oapi_base_url: env::var("DING_OAPI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_OAPI_BASE_URL.into()),
                api_base_url: env::var("DING_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
                request_timeout_secs: env::var("DING_REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|v| v.trim_end_matches('s').parse().ok())
                    .unwrap_or(3),
                todo_timeout_secs: env::var("DING_TODO_TIMEOUT")
                    .ok()
                    .and_then(|v| v.trim_end_matches('s').parse().ok())
                    .unwrap_or(5),
            },
        })
    }
}

impl DingConfig {
    /// 指向指定地址的配置，其余字段取默认值
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        dept_ids: impl Into<String>,
        username_field: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            dept_ids: dept_ids.into(),
            username_field: username_field.into(),
            oapi_base_url: DEFAULT_OAPI_BASE_URL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 3,
            todo_timeout_secs: 5,
        }
    }

    pub fn with_base_urls(mut self, oapi: impl Into<String>, api: impl Into<String>) -> Self {
        self.oapi_base_url = oapi.into();
        self.api_base_url = api.into();
        self
    }

    pub fn validate(&self) -> DingResult<()> {
        if self.app_key.trim().is_empty() || self.app_secret.trim().is_empty() {
            return Err(DingError::Config("缺少 app_key 或 app_secret".into()));
        }
        if self.username_field.trim().is_empty() {
            return Err(DingError::Config("未配置用户名对应字段".into()));
        }
        Ok(())
    }

    /// 解析并去重根部门 id
    pub fn root_dept_ids(&self) -> DingResult<BTreeSet<i64>> {
        let mut ids = BTreeSet::new();
        for raw in self.dept_ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = raw
                .parse::<i64>()
                .map_err(|_| DingError::Config(format!("部门 id 无效: {}", raw)))?;
            ids.insert(id);
        }
        if ids.is_empty() {
            return Err(DingError::Config("未配置根部门 id".into()));
        }
        Ok(ids)
    }

    pub fn oapi_url(&self, path: &str) -> String {
        format!("{}{}", self.oapi_base_url.trim_end_matches('/'), path)
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn todo_timeout(&self) -> Duration {
        Duration::from_secs(self.todo_timeout_secs)
    }
}
