/// 钉钉 access_token 缓存键
pub const ACCESS_TOKEN_KEY: &str = "ding:access_token";

/// 用户名 -> 钉钉 userid 映射键前缀
const USER_ID_PREFIX: &str = "ding:user_id:";

/// 用户名映射有效期（秒）
pub const USER_ID_TTL_SECS: u64 = 86_400;

/// 令牌提前刷新的余量（秒）
pub const TOKEN_REFRESH_SLACK_SECS: i64 = 60;

/// 用户名大小写不敏感
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// 生成用户名映射键
pub fn user_id_key(username: &str) -> String {
    format!("{}{}", USER_ID_PREFIX, normalize_username(username))
}
