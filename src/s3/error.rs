//! Error types for S3 client construction and presigning

use std::time::Duration;
use thiserror::Error;

use crate::s3::types::Operation;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("[{operation}] AWS_REGION is not set")]
    MissingRegion { operation: Operation },

    #[error("presign expiry {0:?} is outside the allowed range of 1s to 7 days")]
    InvalidExpiry(Duration),

    #[error("failed to presign request: {0}")]
    Presign(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
