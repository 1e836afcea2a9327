//! Environment-driven S3 client handles
//!
//! This crate builds and caches AWS S3 clients from environment variables: a
//! primary client for regular operations and a presign client whose endpoint is
//! reachable from outside the deployment.

pub mod s3;
pub mod settings;
