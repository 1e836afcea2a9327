//! Lazily cached S3 client handles
//!
//! [`ClientFactory`] hands out two flavors of client:
//! - the primary client, used for regular object operations
//! - the presign client, whose endpoint is reachable from outside the
//!   deployment (e.g. a browser) and is used to generate presigned URLs
//!
//! Each flavor is built at most once, on the first successful call. A call that
//! fails because `AWS_REGION` is missing caches nothing, so the next call reads
//! the environment again.

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::{Credentials, Region};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::s3::error::{ClientError, Result};
use crate::s3::types::{ClientConfig, Operation};
use crate::settings::{EnvSource, ProcessEnv, AWS_ENDPOINT_URL, AWS_PRESIGN_ENDPOINT_URL};

/// Provider name attached to credentials taken from the environment
const STATIC_CREDENTIALS_PROVIDER: &str = "s3-client-factory-env";

/// Builds a storage client from a [`ClientConfig`]
pub trait ClientBuilder {
    type Client;

    fn build(&self, config: &ClientConfig) -> Self::Client;
}

/// Builds `aws_sdk_s3::Client`s on top of a base SDK config.
///
/// The base config supplies the default credential chain (environment, profile,
/// web identity, container and instance metadata), retry and timeout settings.
/// Everything in the [`ClientConfig`] takes precedence over it.
#[derive(Debug, Clone)]
pub struct SdkClientBuilder {
    base: SdkConfig,
}

impl SdkClientBuilder {
    pub fn new(base: SdkConfig) -> Self {
        Self { base }
    }

    /// Load the base config with the SDK's default provider chains
    pub async fn from_env() -> Self {
        let base = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(base)
    }

    /// Derive the S3 service config for `config`
    pub fn s3_config(&self, config: &ClientConfig) -> aws_sdk_s3::Config {
        let mut builder = aws_sdk_s3::config::Builder::from(&self.base)
            .region(Region::new(config.region.clone()));

        if let Some(creds) = &config.credentials {
            builder = builder.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                None,
                None,
                STATIC_CREDENTIALS_PROVIDER,
            ));
        }

        // The base config may have picked up an endpoint of its own
        builder.set_endpoint_url(config.endpoint.clone());
        builder.set_force_path_style(config.force_path_style);

        builder.build()
    }
}

impl ClientBuilder for SdkClientBuilder {
    type Client = aws_sdk_s3::Client;

    fn build(&self, config: &ClientConfig) -> aws_sdk_s3::Client {
        aws_sdk_s3::Client::from_conf(self.s3_config(config))
    }
}

/// Creates and caches the primary and presign S3 clients.
///
/// One factory is meant to live for the whole process, shared through an `Arc`
/// in application state.
pub struct ClientFactory<B: ClientBuilder, E = ProcessEnv> {
    builder: B,
    env: E,
    primary: Mutex<Option<Arc<B::Client>>>,
    presign: Mutex<Option<Arc<B::Client>>>,
}

impl<B: ClientBuilder> ClientFactory<B, ProcessEnv> {
    /// Factory reading the process environment
    pub fn new(builder: B) -> Self {
        Self::with_env(builder, ProcessEnv)
    }
}

impl<B: ClientBuilder, E: EnvSource> ClientFactory<B, E> {
    pub fn with_env(builder: B, env: E) -> Self {
        Self {
            builder,
            env,
            primary: Mutex::new(None),
            presign: Mutex::new(None),
        }
    }

    #[cfg(test)]
    fn builder(&self) -> &B {
        &self.builder
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Get the primary client, building it on first use.
    ///
    /// Returns `None` (and logs an error) when `AWS_REGION` is not set.
    pub fn primary_client(&self) -> Option<Arc<B::Client>> {
        self.try_primary_client().map_err(log_unavailable).ok()
    }

    /// Get the presign client, building it on first use.
    ///
    /// Without `AWS_PRESIGN_ENDPOINT_URL` this is the primary client.
    /// Returns `None` (and logs an error) when `AWS_REGION` is not set.
    pub fn presign_client(&self) -> Option<Arc<B::Client>> {
        self.try_presign_client().map_err(log_unavailable).ok()
    }

    /// Like [`primary_client`](Self::primary_client), but returns the error
    /// instead of logging it.
    pub fn try_primary_client(&self) -> Result<Arc<B::Client>> {
        let operation = Operation::PrimaryClient;
        let mut slot = lock(&self.primary);
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let mut config = ClientConfig::from_env(&self.env, operation)?;
        config.endpoint = self.env.non_empty(AWS_ENDPOINT_URL);

        let client = Arc::new(self.builder.build(&config));
        *slot = Some(Arc::clone(&client));

        if config.has_credentials() {
            tracing::info!("[{}] S3 initialized with provided credentials.", operation);
        } else {
            tracing::info!("[{}] S3 initialized using default credentials.", operation);
        }

        Ok(client)
    }

    /// Like [`presign_client`](Self::presign_client), but returns the error
    /// instead of logging it.
    pub fn try_presign_client(&self) -> Result<Arc<B::Client>> {
        let operation = Operation::PresignClient;
        let mut slot = lock(&self.presign);
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let Some(endpoint) = self.env.non_empty(AWS_PRESIGN_ENDPOINT_URL) else {
            drop(slot);
            return self.try_primary_client();
        };

        let config = ClientConfig::from_env(&self.env, operation)?.with_endpoint(endpoint.as_str());

        let client = Arc::new(self.builder.build(&config));
        *slot = Some(Arc::clone(&client));

        tracing::info!(
            "[{}] S3 presign client initialized with endpoint: {}",
            operation,
            endpoint
        );

        Ok(client)
    }
}

fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    // A slot only ever holds a fully built client, so a poisoned lock is still usable
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

fn log_unavailable(err: ClientError) {
    match &err {
        ClientError::MissingRegion {
            operation: Operation::PresignClient,
        } => tracing::error!("{}. Cannot initialize S3 presign client.", err),
        ClientError::MissingRegion { .. } => tracing::error!("{}. Cannot initialize S3.", err),
        _ => tracing::error!("{}", err),
    }
}
