//! Presigned URL generation
//!
//! Use the client returned by [`ClientFactory::presign_client`] so that the
//! URLs point at the externally reachable endpoint.
//!
//! [`ClientFactory::presign_client`]: crate::s3::ClientFactory::presign_client

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use std::time::Duration;

use crate::s3::error::{ClientError, Result};

/// Expiry used when the caller has no preference
pub const DEFAULT_PRESIGN_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// Longest expiry SigV4 allows for a presigned request
pub const MAX_PRESIGN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn presigning_config(expires_in: Duration) -> Result<PresigningConfig> {
    if expires_in < Duration::from_secs(1) || expires_in > MAX_PRESIGN_EXPIRY {
        return Err(ClientError::InvalidExpiry(expires_in));
    }

    PresigningConfig::expires_in(expires_in).map_err(|_| ClientError::InvalidExpiry(expires_in))
}

/// Presigned URL for downloading `key` from `bucket`
pub async fn presign_get(
    client: &Client,
    bucket: &str,
    key: &str,
    expires_in: Duration,
) -> Result<String> {
    let config = presigning_config(expires_in)?;

    let request = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .presigned(config)
        .await
        .map_err(|e| ClientError::Presign(e.to_string()))?;

    tracing::debug!("Presigned GET for s3://{}/{} valid for {:?}", bucket, key, expires_in);

    Ok(request.uri().to_string())
}

/// Presigned URL for uploading to `key` in `bucket`
pub async fn presign_put(
    client: &Client,
    bucket: &str,
    key: &str,
    expires_in: Duration,
) -> Result<String> {
    let config = presigning_config(expires_in)?;

    let request = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .presigned(config)
        .await
        .map_err(|e| ClientError::Presign(e.to_string()))?;

    tracing::debug!("Presigned PUT for s3://{}/{} valid for {:?}", bucket, key, expires_in);

    Ok(request.uri().to_string())
}
