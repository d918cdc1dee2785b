use thiserror::Error;

pub type DingResult<T> = Result<T, DingError>;

/// 钉钉同步相关错误
#[derive(Debug, Error)]
pub enum DingError {
    /// 配置缺失或字段名不匹配
    #[error("配置错误: {0}")]
    Config(String),

    /// 钉钉接口返回非零 errcode
    #[error("钉钉接口错误: errcode={errcode}, errmsg={errmsg}")]
    Upstream { errcode: i64, errmsg: String },

    /// 超时、连接失败等，不含请求地址
    #[error("网络请求失败: {0}")]
    Network(reqwest::Error),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("响应解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("缓存操作失败: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("数据库操作失败: {0}")]
    Database(#[from] sqlx::Error),
}

impl DingError {
    pub fn upstream(errcode: i64, errmsg: impl Into<String>) -> Self {
        DingError::Upstream {
            errcode,
            errmsg: errmsg.into(),
        }
    }
}

// 请求地址的查询串里带有 appsecret / access_token，转换时去掉
impl From<reqwest::Error> for DingError {
    fn from(e: reqwest::Error) -> Self {
        DingError::Network(e.without_url())
    }
}
