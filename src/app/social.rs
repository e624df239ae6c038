use crate::app::error::{ServiceError, ServiceResult};
use crate::app::users::resolve_api_key;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct SocialService {
    db: Db,
}

impl SocialService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Follow another user. Returns `false` without inserting anything when
    /// the target is the caller or is already followed; the guarded insert
    /// keeps both cases from reaching the table constraints.
    pub async fn follow(&self, api_key: &str, user_id: i64) -> ServiceResult<bool> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;

        let target = sqlx::query("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;
        if target.is_none() {
            return Err(ServiceError::not_found("User not found"));
        }

        if user.id == user_id {
            tracing::info!(user_id = user.id, "refused self-follow");
            return Ok(false);
        }

        let result = sqlx::query(
            "INSERT INTO follow_relations (follower_id, following_id) \
             SELECT $1, $2 \
             WHERE $1 <> $2 \
             ON CONFLICT DO NOTHING",
        )
        .bind(user.id)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn unfollow(&self, api_key: &str, user_id: i64) -> ServiceResult<bool> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;

        let result = sqlx::query(
            "DELETE FROM follow_relations \
             WHERE follower_id = $1 AND following_id = $2",
        )
        .bind(user.id)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::not_found("User does not follow this user"));
        }
        Ok(true)
    }
}
