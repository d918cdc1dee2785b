use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DingError, DingResult};

/// 本地用户表中 ding_user_id 字段的读写
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_usernames(&self) -> DingResult<Vec<String>>;

    /// 用户不存在时返回 NotFound
    async fn ding_user_id(&self, username: &str) -> DingResult<Option<String>>;

    async fn set_ding_user_id(&self, username: &str, ding_user_id: &str) -> DingResult<()>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_usernames(&self) -> DingResult<Vec<String>> {
        let usernames = sqlx::query_scalar::<_, String>(
            r#"
            SELECT username
            FROM sql_users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(usernames)
    }

    async fn ding_user_id(&self, username: &str) -> DingResult<Option<String>> {
        let row = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT ding_user_id
            FROM sql_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DingError::NotFound(format!("用户 {} 不存在", username)))
    }

    async fn set_ding_user_id(&self, username: &str, ding_user_id: &str) -> DingResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE sql_users
            SET ding_user_id = $1
            WHERE username = $2
            "#,
        )
        .bind(ding_user_id)
        .bind(username)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DingError::NotFound(format!("用户 {} 不存在", username)));
        }
        Ok(())
    }
}
