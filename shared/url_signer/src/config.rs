//! Signer configuration

use std::fmt;

use serde::Deserialize;
use strum::{Display, EnumString};
use url::Url;

use crate::{SignerError, SignerResult};

/// Region used when the configuration does not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Request signing schemes a signer can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SignerAlgorithm {
    /// AWS Signature Version 4, computed by the storage SDK
    #[default]
    #[strum(
        serialize = "AWSS3V4SignerType",
        serialize = "v4",
        to_string = "AWS4-HMAC-SHA256"
    )]
    V4,
    /// Legacy S3 query string authentication (HMAC-SHA1), still required by
    /// some S3-compatible stores
    #[strum(serialize = "v2", to_string = "S3SignerType")]
    V2,
}

/// Storage configuration a [`UrlSigner`](crate::UrlSigner) is built from
#[derive(Clone, Deserialize)]
pub struct SignerConfig {
    /// Access key id
    pub access_key: String,
    /// Secret access key
    pub access_secret: String,
    /// Bucket holding the attachment objects
    pub bucket: String,
    /// Explicit service endpoint, e.g. `http://localhost:9000`
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Signing region; falls back to [`DEFAULT_REGION`]
    #[serde(default)]
    pub region: Option<String>,
    /// Address the bucket as a path segment instead of a subdomain
    #[serde(default)]
    pub path_style_access: bool,
    /// Use the standard endpoint instead of the transfer acceleration one
    #[serde(default)]
    pub disable_accelerate: bool,
    /// Signing scheme override, e.g. `S3SignerType`
    #[serde(default)]
    pub signer_algorithm: Option<String>,
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("access_key", &self.access_key)
            .field("access_secret", &"** redacted **")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("path_style_access", &self.path_style_access)
            .field("disable_accelerate", &self.disable_accelerate)
            .field("signer_algorithm", &self.signer_algorithm)
            .finish()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl SignerConfig {
    /// Creates a configuration with the given credentials and bucket and
    /// every optional setting left at its default
    #[must_use]
    pub fn new(
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            access_secret: access_secret.into(),
            bucket: bucket.into(),
            endpoint: None,
            region: None,
            path_style_access: false,
            disable_accelerate: false,
            signer_algorithm: None,
        }
    }

    /// Effective signing region
    #[must_use]
    pub fn region(&self) -> &str {
        non_empty(self.region.as_ref()).unwrap_or(DEFAULT_REGION)
    }

    /// Explicit endpoint, if one is configured
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        non_empty(self.endpoint.as_ref())
    }

    /// Whether transfer acceleration applies.
    ///
    /// Acceleration endpoints only exist for virtual-hosted addressing against
    /// the service's own endpoints, so an explicit endpoint or path-style
    /// access turns it off.
    #[must_use]
    pub fn accelerate(&self) -> bool {
        !self.disable_accelerate && !self.path_style_access && self.endpoint().is_none()
    }

    /// Effective signing scheme
    ///
    /// # Errors
    ///
    /// Returns `SignerError::ConfigError` if the override names an unknown scheme
    pub fn algorithm(&self) -> SignerResult<SignerAlgorithm> {
        non_empty(self.signer_algorithm.as_ref()).map_or(Ok(SignerAlgorithm::default()), |name| {
            name.parse::<SignerAlgorithm>().map_err(|_| {
                SignerError::ConfigError(format!("Unsupported signer algorithm: {name}"))
            })
        })
    }

    /// Checks the configuration can produce a working signer
    ///
    /// # Errors
    ///
    /// Returns `SignerError::ConfigError` if credentials or the bucket are
    /// missing, the endpoint is not an http(s) URL, or the signer algorithm
    /// is unknown
    pub fn validate(&self) -> SignerResult<()> {
        if self.access_key.trim().is_empty() {
            return Err(SignerError::ConfigError("access key is not set".to_string()));
        }
        if self.access_secret.trim().is_empty() {
            return Err(SignerError::ConfigError("access secret is not set".to_string()));
        }
        if self.bucket.trim().is_empty() {
            return Err(SignerError::ConfigError("bucket is not set".to_string()));
        }

        if let Some(endpoint) = self.endpoint() {
            let url = Url::parse(endpoint).map_err(|e| {
                SignerError::ConfigError(format!("Invalid endpoint {endpoint}: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
                return Err(SignerError::ConfigError(format!(
                    "Invalid endpoint {endpoint}: expected an http(s) URL with a host"
                )));
            }
        }

        self.algorithm().map(|_| ())
    }
}
