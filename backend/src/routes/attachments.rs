use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url_signer::{HttpMethod, UrlSigner};

use crate::types::AppError;

/// Ids stay within the signed 64-bit range clients store them in.
const MAX_ATTACHMENT_ID: u64 = u64::MAX >> 1;

/// Newly allocated attachment slot
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDescriptor {
    /// Attachment id, also the object key
    pub id: u64,
    /// Presigned URL to upload the attachment with a single PUT
    pub location: String,
    /// ISO-8601 UTC timestamp when the location expires
    pub expires_at: String,
}

/// Download location of an existing attachment
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentLocation {
    /// Presigned URL to download the attachment with a single GET
    pub location: String,
    /// ISO-8601 UTC timestamp when the location expires
    pub expires_at: String,
}

/// Path parameters for attachment lookups
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AttachmentPath {
    /// Attachment id returned by the upload allocation
    pub attachment_id: u64,
}

/// Allocates a new attachment id and returns a URL to upload it to
///
/// The upload URL authorizes exactly one `PUT` of an
/// `application/octet-stream` body to the new id and expires after one hour.
///
/// # Errors
///
/// Returns `AppError` if the signer fails to presign the upload
#[instrument(skip(url_signer))]
pub async fn allocate_upload(
    Extension(url_signer): Extension<Arc<UrlSigner>>,
) -> Result<Json<AttachmentDescriptor>, AppError> {
    let attachment_id = rand::thread_rng().gen_range(0..=MAX_ATTACHMENT_ID);

    let presigned = url_signer
        .presigned_url(attachment_id, HttpMethod::Put)
        .await?;

    tracing::info!(attachment_id, "Allocated attachment upload");

    Ok(Json(AttachmentDescriptor {
        id: attachment_id,
        location: presigned.url.to_string(),
        expires_at: presigned.expires_at.to_rfc3339(),
    }))
}

/// Returns a URL to download an attachment
///
/// # Errors
///
/// Returns `AppError` if the signer fails to presign the download
#[instrument(skip(url_signer))]
pub async fn get_download_location(
    Extension(url_signer): Extension<Arc<UrlSigner>>,
    Path(AttachmentPath { attachment_id }): Path<AttachmentPath>,
) -> Result<Json<AttachmentLocation>, AppError> {
    let presigned = url_signer
        .presigned_url(attachment_id, HttpMethod::Get)
        .await?;

    Ok(Json(AttachmentLocation {
        location: presigned.url.to_string(),
        expires_at: presigned.expires_at.to_rfc3339(),
    }))
}
