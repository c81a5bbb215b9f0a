//! Operational routes: health and API documentation

use std::sync::Arc;

use aide::{
    axum::{routing::get, ApiRouter, IntoApiResponse},
    openapi::OpenApi,
    scalar::Scalar,
};
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;
use url_signer::UrlSigner;

use crate::types::Environment;

/// Service status and build information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
    /// Signing scheme presigned URLs are issued with
    signer_algorithm: String,
}

/// Routes that are not part of the versioned API
pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title("Attachment Backend Docs");

    ApiRouter::new()
        .api_route("/health", get(health))
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", axum::routing::get(openapi_schema))
}

/// Health check endpoint
///
/// The signer is built at startup, so a running service can always mint
/// URLs; the response reports which scheme it signs with.
pub async fn health(Extension(url_signer): Extension<Arc<UrlSigner>>) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
        signer_algorithm: url_signer.algorithm().to_string(),
    })
}

#[allow(clippy::unused_async)]
async fn openapi_schema(
    Extension(environment): Extension<Environment>,
    Extension(openapi): Extension<OpenApi>,
) -> impl IntoResponse {
    if !environment.show_api_docs() {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(openapi).into_response()
}
