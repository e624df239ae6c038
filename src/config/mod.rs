use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_connect_timeout_seconds: u64,
    pub db_idle_timeout_seconds: u64,
    /// Directory uploaded files are written to on this host.
    pub media_local_dir: PathBuf,
    /// Path prefix under which clients fetch those files.
    pub media_host_dir: String,
    pub upload_max_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = env_or("HTTP_ADDR", "0.0.0.0:8000");
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;

        Ok(Self {
            http_addr,
            database_url: env_or_err("DATABASE_URL")?,
            db_max_connections: env_or_parse("DB_MAX_CONNECTIONS", "25")?,
            db_connect_timeout_seconds: env_or_parse("DB_CONNECT_TIMEOUT_SECONDS", "5")?,
            db_idle_timeout_seconds: env_or_parse("DB_IDLE_TIMEOUT_SECONDS", "300")?,
            media_local_dir: PathBuf::from(env_or("MEDIA_LOCAL_DIR", "static/media")),
            media_host_dir: env_or("MEDIA_HOST_DIR", "/media"),
            upload_max_bytes: env_or_parse("UPLOAD_MAX_BYTES", "2097152")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_err(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("missing required env var: {}", key))
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
