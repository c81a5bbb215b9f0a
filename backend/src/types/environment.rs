//! Environment configuration for different deployment stages

use std::env;

use tracing::Level;
use url_signer::{SignerConfig, SignerError, SignerResult};

/// LocalStack endpoint used in development
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn required_var(name: &str) -> SignerResult<String> {
    optional_var(name)
        .ok_or_else(|| SignerError::ConfigError(format!("{name} environment variable not set")))
}

fn flag_var(name: &str, default: bool) -> SignerResult<bool> {
    optional_var(name).map_or(Ok(default), |val| {
        match val.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(SignerError::ConfigError(format!(
                "{name} must be a boolean, got {val}"
            ))),
        }
    })
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Storage configuration for the URL signer
    ///
    /// Production and staging read everything from `S3_*` variables and
    /// require credentials and a bucket. Development falls back to a
    /// `LocalStack` setup for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `SignerError::ConfigError` if a required variable is missing
    /// or a flag is not a boolean
    pub fn signer_config(&self) -> SignerResult<SignerConfig> {
        let config = match self {
            Self::Production | Self::Staging => SignerConfig {
                access_key: required_var("S3_ACCESS_KEY")?,
                access_secret: required_var("S3_ACCESS_SECRET")?,
                bucket: required_var("S3_BUCKET_NAME")?,
                endpoint: optional_var("S3_ENDPOINT"),
                region: optional_var("S3_REGION"),
                path_style_access: flag_var("S3_PATH_STYLE_ACCESS", false)?,
                disable_accelerate: flag_var("S3_DISABLE_ACCELERATE", false)?,
                signer_algorithm: optional_var("S3_SIGNER_ALGORITHM"),
            },
            Self::Development => SignerConfig {
                access_key: optional_var("S3_ACCESS_KEY").unwrap_or_else(|| "test".to_string()),
                access_secret: optional_var("S3_ACCESS_SECRET")
                    .unwrap_or_else(|| "test".to_string()),
                bucket: optional_var("S3_BUCKET_NAME")
                    .unwrap_or_else(|| "attachments".to_string()),
                endpoint: optional_var("S3_ENDPOINT")
                    .or_else(|| Some(LOCALSTACK_ENDPOINT.to_string())),
                region: optional_var("S3_REGION"),
                // LocalStack only serves path-style requests on its default endpoint
                path_style_access: flag_var("S3_PATH_STYLE_ACCESS", true)?,
                disable_accelerate: flag_var("S3_DISABLE_ACCELERATE", true)?,
                signer_algorithm: optional_var("S3_SIGNER_ALGORITHM"),
            },
        };

        Ok(config)
    }

    /// Default log level, overridable with `TRACING_LEVEL`
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
