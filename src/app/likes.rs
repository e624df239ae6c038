use sqlx::Row;

use crate::app::error::{ServiceError, ServiceResult};
use crate::app::users::resolve_api_key;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct LikeService {
    db: Db,
}

impl LikeService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Like a tweet. Liking one's own tweet or liking twice returns `false`;
    /// the unique (follower, tweet) constraint backs up the duplicate check.
    pub async fn like(&self, api_key: &str, tweet_id: i64) -> ServiceResult<bool> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;

        let tweet = sqlx::query("SELECT author FROM tweets WHERE id = $1")
            .bind(tweet_id)
            .fetch_optional(self.db.pool())
            .await?;
        let Some(tweet) = tweet else {
            return Err(ServiceError::not_found("Tweet not found"));
        };

        let author: i64 = tweet.get("author");
        if author == user.id {
            tracing::info!(user_id = user.id, tweet_id, "refused like on own tweet");
            return Ok(false);
        }

        let result = sqlx::query(
            "INSERT INTO likes (tweet_id, follower_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(tweet_id)
        .bind(user.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn unlike(&self, api_key: &str, tweet_id: i64) -> ServiceResult<bool> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;

        let result = sqlx::query(
            "DELETE FROM likes WHERE tweet_id = $1 AND follower_id = $2",
        )
        .bind(tweet_id)
        .bind(user.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::not_found(
                "User's like not found on this tweet",
            ));
        }
        Ok(true)
    }
}
