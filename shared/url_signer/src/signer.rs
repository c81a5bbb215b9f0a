//! Presigned URL signer

use std::time::{Duration, SystemTime};

use aws_sdk_s3::{
    config::{http::HttpRequest, BehaviorVersion, Credentials, Region},
    error::DisplayErrorContext,
    presigning::{PresignedRequest, PresigningConfig},
    Client,
};
use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{legacy, HttpMethod, SignerAlgorithm, SignerConfig, SignerError, SignerResult};

/// How long a presigned URL stays valid
pub const PRESIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// Content type bound into every presigned request's signature
pub const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPE_HEADER: &str = "content-type";

const CREDENTIALS_PROVIDER: &str = "url-signer";

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL
    pub url: Url,
    /// The single method the URL authorizes
    pub method: HttpMethod,
    /// UTC instant after which the signature is rejected
    pub expires_at: DateTime<Utc>,
}

/// Mints presigned URLs for objects in one bucket
///
/// The storage client is built once from the immutable configuration and
/// reused by every call, so a signer can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    client: Client,
    config: SignerConfig,
    algorithm: SignerAlgorithm,
}

impl UrlSigner {
    /// Creates a new signer
    ///
    /// # Errors
    ///
    /// Returns `SignerError::ConfigError` if the configuration is incomplete
    /// or malformed
    pub fn new(config: SignerConfig) -> SignerResult<Self> {
        config.validate()?;
        let algorithm = config.algorithm()?;

        if !config.disable_accelerate && !config.accelerate() {
            warn!(
                bucket = %config.bucket,
                "Transfer acceleration does not apply to path-style access or custom endpoints, using the standard endpoint"
            );
        }

        let credentials = Credentials::new(
            &config.access_key,
            &config.access_secret,
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region().to_owned()))
            .credentials_provider(credentials)
            .force_path_style(config.path_style_access)
            .accelerate(config.accelerate());

        if let Some(endpoint) = config.endpoint() {
            builder = builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(builder.build());

        info!(
            bucket = %config.bucket,
            region = config.region(),
            endpoint = config.endpoint().unwrap_or("default"),
            path_style = config.path_style_access,
            accelerate = config.accelerate(),
            algorithm = %algorithm,
            "Initialized URL signer"
        );

        Ok(Self {
            client,
            config,
            algorithm,
        })
    }

    /// Bucket the signer addresses
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Signing scheme in use
    #[must_use]
    pub const fn algorithm(&self) -> SignerAlgorithm {
        self.algorithm
    }

    /// Generates a presigned URL for `object_id`, valid for one hour from now
    ///
    /// # Errors
    ///
    /// Returns `SignerError::PresignError` if the storage client cannot
    /// resolve an endpoint or sign the request
    pub async fn presigned_url(
        &self,
        object_id: u64,
        method: HttpMethod,
    ) -> SignerResult<PresignedUrl> {
        self.presigned_url_at(object_id, method, SystemTime::now())
            .await
    }

    /// Generates a presigned URL for `object_id` as if called at `now`
    ///
    /// Signatures carry whole seconds, so `now` is truncated to the second
    /// before signing.
    ///
    /// # Errors
    ///
    /// Returns `SignerError::PresignError` if the storage client cannot
    /// resolve an endpoint or sign the request
    #[instrument(skip(self, now), fields(bucket = %self.config.bucket))]
    pub async fn presigned_url_at(
        &self,
        object_id: u64,
        method: HttpMethod,
        now: SystemTime,
    ) -> SignerResult<PresignedUrl> {
        let start_time = DateTime::<Utc>::from(now).trunc_subsecs(0);
        let expires_at = start_time + PRESIGNED_URL_TTL;
        let key = object_id.to_string();

        let presigning_config = PresigningConfig::builder()
            .start_time(start_time.into())
            .expires_in(PRESIGNED_URL_TTL)
            .build()
            .map_err(|e| {
                SignerError::ConfigError(format!("Failed to create presigning config: {e}"))
            })?;

        let request = self.presign_request(&key, method, presigning_config).await?;
        let url = Url::parse(&request.uri().to_string())?;

        let url = match self.algorithm {
            SignerAlgorithm::V4 => url,
            SignerAlgorithm::V2 => legacy::presign(
                url,
                method,
                Some(ATTACHMENT_CONTENT_TYPE),
                expires_at.timestamp(),
                &self.config.bucket,
                &key,
                &self.config.access_key,
                &self.config.access_secret,
            )?,
        };

        debug!(
            host = url.host_str().unwrap_or_default(),
            path = url.path(),
            expires_at = %expires_at,
            "Generated presigned URL"
        );

        Ok(PresignedUrl {
            url,
            method,
            expires_at,
        })
    }

    async fn presign_request(
        &self,
        key: &str,
        method: HttpMethod,
        presigning_config: PresigningConfig,
    ) -> SignerResult<PresignedRequest> {
        let bucket = &self.config.bucket;

        match method {
            HttpMethod::Get => self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .customize()
                .mutate_request(bind_content_type)
                .presigned(presigning_config)
                .await
                .map_err(presign_error),
            HttpMethod::Put => self
                .client
                .put_object()
                .bucket(bucket)
                .key(key)
                .content_type(ATTACHMENT_CONTENT_TYPE)
                .presigned(presigning_config)
                .await
                .map_err(presign_error),
            HttpMethod::Head => self
                .client
                .head_object()
                .bucket(bucket)
                .key(key)
                .customize()
                .mutate_request(bind_content_type)
                .presigned(presigning_config)
                .await
                .map_err(presign_error),
            HttpMethod::Delete => self
                .client
                .delete_object()
                .bucket(bucket)
                .key(key)
                .customize()
                .mutate_request(bind_content_type)
                .presigned(presigning_config)
                .await
                .map_err(presign_error),
        }
    }
}

// Only PutObject models a content type, the other operations get the header
// set on the outgoing request before it is signed.
fn bind_content_type(request: &mut HttpRequest) {
    request
        .headers_mut()
        .insert(CONTENT_TYPE_HEADER, ATTACHMENT_CONTENT_TYPE);
}

fn presign_error<E: std::error::Error + 'static>(error: E) -> SignerError {
    SignerError::PresignError(format!(
        "Failed to generate presigned URL: {}",
        DisplayErrorContext(error)
    ))
}
