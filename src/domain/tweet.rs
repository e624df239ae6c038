use serde::{Deserialize, Serialize};

use crate::domain::user::UserRef;

/// One user's like on a tweet, as it appears in the enriched payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRef {
    pub user_id: i64,
    pub name: String,
}

/// A tweet with author identity, attachment paths, and its like list
/// stitched in. This is the unit the feed returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedTweet {
    pub id: i64,
    pub content: String,
    pub attachments: Vec<String>,
    pub author: UserRef,
    pub likes: Vec<LikeRef>,
}
