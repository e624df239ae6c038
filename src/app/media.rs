use crate::app::error::ServiceResult;
use crate::app::users::resolve_api_key;
use crate::infra::db::Db;
use crate::infra::storage::MediaDisk;

/// A registered attachment, not yet adopted by any tweet.
#[derive(Debug, Clone)]
pub struct RegisteredMedia {
    pub id: i64,
    pub file_name: String,
}

#[derive(Clone)]
pub struct MediaService {
    db: Db,
    disk: MediaDisk,
}

impl MediaService {
    pub fn new(db: Db, disk: MediaDisk) -> Self {
        Self { db, disk }
    }

    /// Register an uploaded file: reserve a row to get an id, derive the
    /// stored file name from it, then fill in the paths. The caller writes
    /// the bytes to `disk` under the returned file name.
    pub async fn register(
        &self,
        api_key: &str,
        original_file_name: &str,
    ) -> ServiceResult<RegisteredMedia> {
        let _user = resolve_api_key(self.db.pool(), api_key).await?;

        let mut tx = self.db.pool().begin().await?;

        let media_id: i64 = sqlx::query_scalar(
            "INSERT INTO media_attachments DEFAULT VALUES RETURNING id",
        )
        .fetch_one(&mut *tx)
        .await?;

        let extension = original_file_name
            .rsplit('.')
            .next()
            .unwrap_or("bin");
        let file_name = format!("{}_{}_media.{}", media_id, api_key, extension);
        let local_path = self.disk.local_path(&file_name).to_string_lossy().to_string();
        let host_path = self.disk.host_path(&file_name);

        sqlx::query(
            "UPDATE media_attachments \
             SET file_name = $2, local_path = $3, host_path = $4 \
             WHERE id = $1",
        )
        .bind(media_id)
        .bind(&file_name)
        .bind(&local_path)
        .bind(&host_path)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RegisteredMedia {
            id: media_id,
            file_name,
        })
    }
}
