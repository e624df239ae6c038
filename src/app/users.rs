use sqlx::{PgPool, Row};

use crate::app::error::{ServiceError, ServiceResult};
use crate::domain::user::{UserProfile, UserRef};
use crate::infra::db::Db;

/// Resolve an api key to the user it identifies. Shared by every service:
/// each operation starts by establishing who is calling.
pub(crate) async fn resolve_api_key(pool: &PgPool, api_key: &str) -> ServiceResult<UserRef> {
    let row = sqlx::query("SELECT id, name FROM users WHERE api_key = $1")
        .bind(api_key)
        .fetch_optional(pool)
        .await?;

    let row = row.ok_or_else(|| ServiceError::not_found("User not found"))?;
    Ok(UserRef {
        id: row.get("id"),
        name: row.get("name"),
    })
}

#[derive(Clone)]
pub struct UserService {
    db: Db,
}

impl UserService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn profile_by_api_key(&self, api_key: &str) -> ServiceResult<UserProfile> {
        let user = resolve_api_key(self.db.pool(), api_key).await?;
        self.build_profile(user).await
    }

    pub async fn profile_by_id(&self, user_id: i64) -> ServiceResult<UserProfile> {
        let row = sqlx::query("SELECT id, name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        let row = row.ok_or_else(|| ServiceError::not_found("User not found"))?;
        let user = UserRef {
            id: row.get("id"),
            name: row.get("name"),
        };
        self.build_profile(user).await
    }

    async fn build_profile(&self, user: UserRef) -> ServiceResult<UserProfile> {
        let following = sqlx::query(
            "SELECT u.id, u.name \
             FROM follow_relations f \
             JOIN users u ON u.id = f.following_id \
             WHERE f.follower_id = $1 \
             ORDER BY u.id",
        )
        .bind(user.id)
        .fetch_all(self.db.pool())
        .await?;

        let followers = sqlx::query(
            "SELECT u.id, u.name \
             FROM follow_relations f \
             JOIN users u ON u.id = f.follower_id \
             WHERE f.following_id = $1 \
             ORDER BY u.id",
        )
        .bind(user.id)
        .fetch_all(self.db.pool())
        .await?;

        let as_ref = |row: &sqlx::postgres::PgRow| UserRef {
            id: row.get("id"),
            name: row.get("name"),
        };

        Ok(UserProfile {
            id: user.id,
            name: user.name,
            followers: followers.iter().map(as_ref).collect(),
            following: following.iter().map(as_ref).collect(),
        })
    }
}
