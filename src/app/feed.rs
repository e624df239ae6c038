use std::collections::HashMap;

use futures::try_join;
use sqlx::Row;

use crate::app::error::ServiceResult;
use crate::app::users::resolve_api_key;
use crate::domain::tweet::{EnrichedTweet, LikeRef};
use crate::domain::user::UserRef;
use crate::infra::db::Db;

/// Builds the per-user feed: tweets from followed accounts, grouped by
/// account and ranked by popularity, each enriched with its author, like
/// list, and resolved attachment paths.
#[derive(Clone)]
pub struct FeedService {
    db: Db,
}

/// One row of the grouped tweet query, before enrichment.
#[derive(Debug, Clone)]
struct FeedRow {
    id: i64,
    content: String,
    attachments: Vec<i64>,
    author_id: i64,
    author_name: String,
    like_count: i64,
}

/// A like on one of the feed's tweets, with the liker's name resolved.
#[derive(Debug, Clone)]
struct TweetLike {
    tweet_id: i64,
    user_id: i64,
    name: String,
}

impl FeedService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Read-only; issues the grouped tweet query, then the likes and
    /// attachment-path lookups (those two run concurrently, neither depends
    /// on the other). Any storage error discards the whole call.
    pub async fn get_feed(&self, api_key: &str) -> ServiceResult<Vec<EnrichedTweet>> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;

        let rows = sqlx::query(
            "SELECT t.id, t.content, t.attachments, t.author, \
                    f.name AS author_name, COUNT(l.id) AS like_count \
             FROM tweets t \
             JOIN ( \
                 SELECT fr.following_id, u.name \
                 FROM follow_relations fr \
                 JOIN users u ON u.id = fr.following_id \
                 WHERE fr.follower_id = $1 \
             ) f ON f.following_id = t.author \
             LEFT JOIN likes l ON l.tweet_id = t.id \
             GROUP BY t.id, t.content, t.attachments, t.author, f.name \
             ORDER BY t.id",
        )
        .bind(user.id)
        .fetch_all(self.db.pool())
        .await?;

        let mut feed_rows = Vec::with_capacity(rows.len());
        for row in rows {
            feed_rows.push(FeedRow {
                id: row.get("id"),
                content: row.get("content"),
                attachments: row.get("attachments"),
                author_id: row.get("author"),
                author_name: row.get("author_name"),
                like_count: row.get("like_count"),
            });
        }

        // Zero follows or zero tweets is an ordinary empty feed.
        if feed_rows.is_empty() {
            return Ok(Vec::new());
        }

        let tweet_ids: Vec<i64> = feed_rows.iter().map(|row| row.id).collect();
        let media_ids: Vec<i64> = feed_rows
            .iter()
            .flat_map(|row| row.attachments.iter().copied())
            .collect();

        let (likes, media_paths) = try_join!(
            self.likes_for(&tweet_ids),
            self.attachment_paths(&media_ids),
        )?;

        Ok(compose_feed(feed_rows, likes, media_paths))
    }

    /// All likes on the given tweets, whoever they come from.
    async fn likes_for(&self, tweet_ids: &[i64]) -> ServiceResult<Vec<TweetLike>> {
        let rows = sqlx::query(
            "SELECT l.tweet_id, l.follower_id, u.name \
             FROM likes l \
             JOIN users u ON u.id = l.follower_id \
             WHERE l.tweet_id = ANY($1) \
             ORDER BY l.id",
        )
        .bind(tweet_ids)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| TweetLike {
                tweet_id: row.get("tweet_id"),
                user_id: row.get("follower_id"),
                name: row.get("name"),
            })
            .collect())
    }

    /// Batch media-id -> host-path lookup. No ids, no query.
    async fn attachment_paths(&self, media_ids: &[i64]) -> ServiceResult<HashMap<i64, String>> {
        if media_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            "SELECT id, host_path FROM media_attachments WHERE id = ANY($1)",
        )
        .bind(media_ids)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| (row.get("id"), row.get("host_path")))
            .collect())
    }
}

/// Pure stitching step: order the tweets and merge in likes and attachment
/// paths. Ordering is by followed account name ascending, then like count
/// descending, then tweet id ascending as the deterministic tie-break.
fn compose_feed(
    mut rows: Vec<FeedRow>,
    likes: Vec<TweetLike>,
    media_paths: HashMap<i64, String>,
) -> Vec<EnrichedTweet> {
    rows.sort_by(|a, b| {
        a.author_name
            .cmp(&b.author_name)
            .then(b.like_count.cmp(&a.like_count))
            .then(a.id.cmp(&b.id))
    });

    let mut likes_by_tweet: HashMap<i64, Vec<LikeRef>> = HashMap::new();
    for like in likes {
        likes_by_tweet.entry(like.tweet_id).or_default().push(LikeRef {
            user_id: like.user_id,
            name: like.name,
        });
    }

    rows.into_iter()
        .map(|row| EnrichedTweet {
            id: row.id,
            content: row.content,
            attachments: row
                .attachments
                .iter()
                .filter_map(|media_id| media_paths.get(media_id).cloned())
                .collect(),
            author: UserRef {
                id: row.author_id,
                name: row.author_name,
            },
            likes: likes_by_tweet.remove(&row.id).unwrap_or_default(),
        })
        .collect()
}
