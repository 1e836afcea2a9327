//! S3 client construction module
//!
//! This module provides environment-driven S3 client handles:
//! - [`client::ClientFactory`] - Lazily built, cached primary and presign clients
//! - [`client::SdkClientBuilder`] - Builds `aws_sdk_s3::Client`s from a [`ClientConfig`]
//! - [`presign`] - Presigned GET/PUT URL generation
//! - [`types`] - Client configuration types

pub mod client;
pub mod error;
pub mod presign;
pub mod types;

// Re-export commonly used types
pub use client::{ClientBuilder, ClientFactory, SdkClientBuilder};
pub use error::ClientError;
pub use presign::{presign_get, presign_put, DEFAULT_PRESIGN_EXPIRY};
pub use types::{ClientConfig, Operation, StaticCredentials};
