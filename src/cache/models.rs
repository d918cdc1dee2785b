use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 令牌缓存数据模型
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CachedAccessToken {
    pub access_token: String,
    pub expires_at: i64, // Unix timestamp，钉钉返回的真实过期时间
}

impl CachedAccessToken {
    /// 距过期不足 slack 秒即视为过期
    pub fn is_expired(&self, slack_secs: i64) -> bool {
        self.expires_at - slack_secs <= Utc::now().timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_honours_slack() {
        let token = CachedAccessToken {
            access_token: "t".into(),
            expires_at: Utc::now().timestamp() + 90,
        };
        assert!(!token.is_expired(60));
        assert!(token.is_expired(120));
    }
}
