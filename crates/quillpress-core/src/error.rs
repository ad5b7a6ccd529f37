use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the storage capability itself. A missing key is not an error;
/// adapter operations report absence as `Option::None`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
