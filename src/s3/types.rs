//! S3 client configuration types

use serde::Serialize;
use std::fmt;

use crate::s3::error::{ClientError, Result};
use crate::settings::{
    parse_flag, EnvSource, AWS_ACCESS_KEY_ID, AWS_FORCE_PATH_STYLE, AWS_REGION,
    AWS_SECRET_ACCESS_KEY,
};

/// Factory operation, used to tag log messages and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PrimaryClient,
    PresignClient,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PrimaryClient => "primary_client",
            Operation::PresignClient => "presign_client",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static access key pair
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct StaticCredentials {
    pub access_key_id: String,
    #[serde(skip_serializing)]
    pub secret_access_key: String,
}

impl StaticCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Configuration handed to the storage client builder.
///
/// Optional fields are left as `None` rather than defaulted, so that an unset
/// setting is never confused with an explicit `false` or empty value, and so
/// that serialization omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_path_style: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<StaticCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ClientConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            force_path_style: None,
            credentials: None,
            endpoint: None,
        }
    }

    /// Build the base config (region, path style, credentials) from the environment.
    ///
    /// The endpoint is left unset; each factory operation decides which one applies.
    pub fn from_env(env: &impl EnvSource, operation: Operation) -> Result<Self> {
        let region = env
            .non_empty(AWS_REGION)
            .ok_or(ClientError::MissingRegion { operation })?;

        let mut config = Self::new(region);

        if parse_flag(env.var(AWS_FORCE_PATH_STYLE).as_deref()) {
            config.force_path_style = Some(true);
        }

        if let (Some(access_key_id), Some(secret_access_key)) = (
            env.non_empty(AWS_ACCESS_KEY_ID),
            env.non_empty(AWS_SECRET_ACCESS_KEY),
        ) {
            config.credentials = Some(StaticCredentials::new(access_key_id, secret_access_key));
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Whether explicit credentials are attached (otherwise the default chain applies)
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}
