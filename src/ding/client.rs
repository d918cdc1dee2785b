use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::cache::ExpiringCache;
use crate::config::DingConfig;
use crate::error::{DingError, DingResult};

/// 钉钉开放平台客户端
///
/// 所有请求顺序执行，每次调用带固定超时。令牌与用户映射写入注入的缓存。
#[derive(Clone)]
pub struct DingClient {
    pub(super) config: DingConfig,
    pub(super) http: reqwest::Client,
    pub(super) cache: Arc<dyn ExpiringCache>,
}

impl DingClient {
    pub fn new(config: DingConfig, cache: Arc<dyn ExpiringCache>) -> DingResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            config,
            http,
            cache,
        })
    }

    pub fn config(&self) -> &DingConfig {
        &self.config
    }

    /// 调用 oapi 接口，errcode 为 0 才算成功
    pub(super) async fn oapi_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> DingResult<T> {
        let url = self.config.oapi_url(path);
        debug!(path, "Calling DingTalk open API");

        let response = self
            .http
            .get(&url)
            .query(query)
            .timeout(self.config.request_timeout())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            error!(path, status = status.as_u16(), %body, "DingTalk API request failed");
            return Err(DingError::upstream(status.as_u16() as i64, body));
        }
        let body: Value = serde_json::from_slice(&bytes)?;

        let errcode = body.get("errcode").and_then(Value::as_i64).unwrap_or(-1);
        if errcode != 0 {
            let errmsg = body
                .get("errmsg")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            error!(path, %body, "DingTalk API returned an error");
            return Err(DingError::upstream(errcode, errmsg));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// 调用 v1.0 新版接口，以 HTTP 状态码判断成败
    pub(super) async fn api_send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        access_token: &str,
    ) -> DingResult<T> {
        let response = request
            .header("x-acs-dingtalk-access-token", access_token)
            .timeout(self.config.todo_timeout())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            error!(status = status.as_u16(), %body, "DingTalk API request failed");
            return Err(DingError::upstream(status.as_u16() as i64, body));
        }

        debug!(status = status.as_u16(), "DingTalk API request succeeded");
        Ok(serde_json::from_slice(&bytes)?)
    }
}
