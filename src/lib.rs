pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;

use crate::infra::{db::Db, storage::MediaDisk};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub media: MediaDisk,
    pub upload_max_bytes: usize,
}
