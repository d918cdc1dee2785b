use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, instrument, warn};

use super::DingClient;
use super::models::TokenResponse;
use crate::cache::CachedAccessToken;
use crate::cache::keys::{ACCESS_TOKEN_KEY, TOKEN_REFRESH_SLACK_SECS};
use crate::error::{DingError, DingResult};

/// 钉钉 access_token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl DingClient {
    /// 获取 access_token，优先读缓存
    #[instrument(skip(self))]
    pub async fn get_access_token(&self) -> DingResult<AccessToken> {
        if let Some(token) = self.cached_access_token().await {
            debug!("Using cached DingTalk access token");
            return Ok(token);
        }

        debug!("Requesting new DingTalk access token");
        let resp: TokenResponse = self
            .oapi_get(
                "/gettoken",
                &[
                    ("appkey", self.config.app_key.as_str()),
                    ("appsecret", self.config.app_secret.as_str()),
                ],
            )
            .await?;

        let expires_at = Duration::try_seconds(resp.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                error!(expires_in = resp.expires_in, "DingTalk access token expiry out of range");
                DingError::upstream(-1, format!("expires_in 超出范围: {}", resp.expires_in))
            })?;
        let ttl = resp.expires_in - TOKEN_REFRESH_SLACK_SECS;
        if ttl > 0 {
            let cached = CachedAccessToken {
                access_token: resp.access_token.clone(),
                expires_at: expires_at.timestamp(),
            };
            let json = serde_json::to_string(&cached)?;
            // 写缓存失败不影响本次使用
            if let Err(e) = self.cache.set_ex(ACCESS_TOKEN_KEY, &json, ttl as u64).await {
                error!("Failed to cache DingTalk access token: {}", e);
            }
        } else {
            warn!(
                expires_in = resp.expires_in,
                "DingTalk access token expires within refresh slack, not caching"
            );
        }

        Ok(AccessToken {
            value: resp.access_token,
            expires_at,
        })
    }

    async fn cached_access_token(&self) -> Option<AccessToken> {
        let json = match self.cache.get(ACCESS_TOKEN_KEY).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                error!("Failed to read cached DingTalk access token: {}", e);
                return None;
            }
        };

        let cached: CachedAccessToken = match serde_json::from_str(&json) {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Discarding malformed cached access token: {}", e);
                return None;
            }
        };
        if cached.is_expired(TOKEN_REFRESH_SLACK_SECS) {
            return None;
        }

        Some(AccessToken {
            value: cached.access_token,
            expires_at: DateTime::<Utc>::from_timestamp(cached.expires_at, 0)?,
        })
    }
}
