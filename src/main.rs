//! S3 client diagnostics
//!
//! Builds the primary and presign clients from the environment and reports
//! which ones are available. With a key argument, prints a presigned GET URL.
//!
//! Usage: s3-client-factory [KEY [BUCKET]]
//!
//! BUCKET defaults to `AWS_BUCKET_NAME`.

use anyhow::{bail, Context, Result};
use s3_client_factory::s3::{presign_get, ClientFactory, SdkClientBuilder, DEFAULT_PRESIGN_EXPIRY};
use s3_client_factory::settings::{EnvSource, AWS_BUCKET_NAME};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting s3-client-factory v{}", env!("CARGO_PKG_VERSION"));

    let factory = ClientFactory::new(SdkClientBuilder::from_env().await);

    let Some(primary) = factory.primary_client() else {
        bail!("S3 is unavailable; set AWS_REGION");
    };
    let presign = factory
        .presign_client()
        .context("S3 presign client is unavailable")?;

    if Arc::ptr_eq(&primary, &presign) {
        println!("primary client: ready (also used for presigning)");
    } else {
        println!("primary client: ready");
        println!("presign client: ready (separate endpoint)");
    }

    let mut args = std::env::args().skip(1);
    let Some(key) = args.next() else {
        return Ok(());
    };
    let bucket = match args.next() {
        Some(bucket) => bucket,
        None => factory
            .env()
            .non_empty(AWS_BUCKET_NAME)
            .context("no bucket given and AWS_BUCKET_NAME is not set")?,
    };

    let url = presign_get(&presign, &bucket, &key, DEFAULT_PRESIGN_EXPIRY).await?;
    println!("{}", url);

    Ok(())
}
