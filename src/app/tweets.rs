use sqlx::Row;

use crate::app::error::{ServiceError, ServiceResult};
use crate::app::users::resolve_api_key;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct TweetService {
    db: Db,
}

impl TweetService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create a tweet and adopt the referenced media rows in one
    /// transaction. Referencing a media id that does not exist (or that
    /// already belongs to a tweet) rolls the whole thing back.
    pub async fn create(
        &self,
        api_key: &str,
        content: &str,
        media_ids: &[i64],
    ) -> ServiceResult<i64> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;

        let mut tx = self.db.pool().begin().await?;

        let tweet_id: i64 = sqlx::query_scalar(
            "INSERT INTO tweets (content, attachments, author) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(content)
        .bind(media_ids)
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await?;

        if !media_ids.is_empty() {
            let adopted = sqlx::query(
                "UPDATE media_attachments SET tweet_id = $1 \
                 WHERE id = ANY($2) AND tweet_id IS NULL",
            )
            .bind(tweet_id)
            .bind(media_ids)
            .execute(&mut *tx)
            .await?;

            if adopted.rows_affected() != media_ids.len() as u64 {
                tx.rollback().await?;
                return Err(ServiceError::not_found("Media not found"));
            }
        }

        tx.commit().await?;

        Ok(tweet_id)
    }

    /// Delete a tweet (author only). Likes and media rows go with it via
    /// cascade; the returned local paths are the files the caller still has
    /// to remove from disk.
    pub async fn delete(&self, api_key: &str, tweet_id: i64) -> ServiceResult<Vec<String>> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;

        let tweet = sqlx::query("SELECT author, attachments FROM tweets WHERE id = $1")
            .bind(tweet_id)
            .fetch_optional(self.db.pool())
            .await?;
        let Some(tweet) = tweet else {
            return Err(ServiceError::not_found("Tweet not found"));
        };

        let author: i64 = tweet.get("author");
        if author != user.id {
            return Err(ServiceError::not_found(
                "User does not have a permission to remove the tweet",
            ));
        }

        let attachments: Vec<i64> = tweet.get("attachments");
        let local_paths: Vec<String> = if attachments.is_empty() {
            Vec::new()
        } else {
            sqlx::query_scalar(
                "SELECT local_path FROM media_attachments WHERE id = ANY($1)",
            )
            .bind(&attachments)
            .fetch_all(self.db.pool())
            .await?
        };

        sqlx::query("DELETE FROM tweets WHERE id = $1")
            .bind(tweet_id)
            .execute(self.db.pool())
            .await?;

        Ok(local_paths)
    }
}
