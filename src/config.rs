//! Protocol configuration
//!
//! The contract shapes target a specific Engine API version. Transport
//! collaborators use [`ApiConfig`] to prefix request paths with it.

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable overriding the targeted API version
pub const API_VERSION_ENV: &str = "RUNE_API_VERSION";

/// API version the shapes in this crate were declared against
pub const DEFAULT_API_VERSION: ApiVersion = ApiVersion { major: 1, minor: 18 };

/// Engine API version, e.g. `1.18`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        DEFAULT_API_VERSION
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('v');
        let (major, minor) = trimmed
            .split_once('.')
            .ok_or_else(|| ApiError::InvalidConfig(format!("API version '{}' is not MAJOR.MINOR", s)))?;
        let major = major
            .parse()
            .map_err(|_| ApiError::InvalidConfig(format!("Invalid API major version in '{}'", s)))?;
        let minor = minor
            .parse()
            .map_err(|_| ApiError::InvalidConfig(format!("Invalid API minor version in '{}'", s)))?;
        Ok(Self { major, minor })
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.to_string()
    }
}

/// Contract-layer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API version requests are addressed to
    pub api_version: ApiVersion,
}

impl ApiConfig {
    pub fn new(api_version: ApiVersion) -> Self {
        Self { api_version }
    }

    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_VERSION_ENV) {
            Ok(raw) if !raw.trim().is_empty() => {
                let api_version = raw.parse()?;
                tracing::debug!("Using API version {} from {}", api_version, API_VERSION_ENV);
                Ok(Self { api_version })
            }
            _ => Ok(Self::default()),
        }
    }

    /// Prefix an endpoint path with the configured version, e.g. `/v1.18/info`
    pub fn versioned_path(&self, path: &str) -> String {
        format!("/v{}/{}", self.api_version, path.trim_start_matches('/'))
    }
}
