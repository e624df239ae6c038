use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::AppConfig;

/// Local-disk sink for uploaded media. The database stores two views of a
/// file: `local_path` (where the bytes live on this host) and `host_path`
/// (the path clients fetch it under).
#[derive(Clone)]
pub struct MediaDisk {
    local_dir: PathBuf,
    host_dir: String,
}

impl MediaDisk {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.media_local_dir).await?;
        Ok(Self {
            local_dir: config.media_local_dir.clone(),
            host_dir: config.media_host_dir.clone(),
        })
    }

    pub fn local_path(&self, file_name: &str) -> PathBuf {
        self.local_dir.join(file_name)
    }

    pub fn host_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.host_dir.trim_end_matches('/'), file_name)
    }

    pub async fn save(&self, file_name: &str, contents: &[u8]) -> Result<()> {
        tokio::fs::write(self.local_path(file_name), contents).await?;
        Ok(())
    }

    /// Remove a stored file. A file that is already gone is logged and
    /// otherwise ignored: the database row is the source of truth and has
    /// already been deleted by the time this runs.
    pub async fn remove(&self, local_path: &str) {
        if let Err(err) = tokio::fs::remove_file(Path::new(local_path)).await {
            warn!(error = %err, path = %local_path, "failed to remove media file");
        }
    }
}
