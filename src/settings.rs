//! Environment settings for S3 client construction
//!
//! All configuration comes from environment variables read at call time:
//! - `AWS_REGION` (required)
//! - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`
//! - `AWS_ENDPOINT_URL`
//! - `AWS_FORCE_PATH_STYLE`
//! - `AWS_PRESIGN_ENDPOINT_URL`
//! - `AWS_BUCKET_NAME` (diagnostic binary only)

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
pub const AWS_FORCE_PATH_STYLE: &str = "AWS_FORCE_PATH_STYLE";
pub const AWS_PRESIGN_ENDPOINT_URL: &str = "AWS_PRESIGN_ENDPOINT_URL";
pub const AWS_BUCKET_NAME: &str = "AWS_BUCKET_NAME";

/// Source of environment variables
pub trait EnvSource {
    /// Raw value of `key`, or `None` if it is not set
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, treating an empty string the same as unset
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

impl<T: EnvSource + ?Sized> EnvSource for Arc<T> {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment that can be changed after the factory is built
#[derive(Debug, Default)]
pub struct MapEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value
    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    /// Unset a variable
    pub fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: RwLock::new(vars),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

/// Parse a boolean environment flag.
///
/// Only `"true"` (case-insensitive, surrounding whitespace ignored) is enabled.
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}
