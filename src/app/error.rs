use thiserror::Error;

/// Failure taxonomy surfaced by the service layer. Everything the storage
/// layer throws is wrapped as a single `Storage` failure; callers never see
/// partial results.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Stable name used in the `error_type` field of error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::Storage(_) => "StorageFailure",
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
