//! Legacy S3 query string authentication
//!
//! Older S3-compatible stores only accept the HMAC-SHA1 scheme, where the
//! signature covers the method, content type, expiry and resource path and is
//! carried in the `AWSAccessKeyId`, `Expires` and `Signature` query
//! parameters.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

use crate::{HttpMethod, SignerError, SignerResult};

type HmacSha1 = Hmac<Sha1>;

/// Builds the string the legacy scheme signs
pub(crate) fn string_to_sign(
    method: HttpMethod,
    content_type: Option<&str>,
    expires: i64,
    bucket: &str,
    key: &str,
) -> String {
    // Content-MD5 is never bound into presigned attachment URLs.
    format!(
        "{method}\n\n{}\n{expires}\n/{bucket}/{key}",
        content_type.unwrap_or_default()
    )
}

/// Base64 HMAC-SHA1 of the string to sign
pub(crate) fn signature(secret: &str, string_to_sign: &str) -> SignerResult<String> {
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|e| SignerError::ConfigError(format!("Invalid access secret: {e}")))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Replaces the query of `resolved` with legacy authentication parameters.
///
/// `resolved` is the object URL as addressed by the storage client; only its
/// scheme, host and path are kept.
#[allow(clippy::too_many_arguments)]
pub(crate) fn presign(
    mut resolved: Url,
    method: HttpMethod,
    content_type: Option<&str>,
    expires: i64,
    bucket: &str,
    key: &str,
    access_key: &str,
    secret: &str,
) -> SignerResult<Url> {
    let signature = signature(
        secret,
        &string_to_sign(method, content_type, expires, bucket, key),
    )?;

    resolved.set_fragment(None);
    resolved.set_query(None);
    resolved
        .query_pairs_mut()
        .append_pair("AWSAccessKeyId", access_key)
        .append_pair("Expires", &expires.to_string())
        .append_pair("Signature", &signature);

    Ok(resolved)
}
