//! Presigned URL generation for attachment objects
//!
//! This crate builds time-limited, signed URLs for single objects in an
//! S3-compatible bucket. A [`UrlSigner`] is created once from a
//! [`SignerConfig`] and can then be shared across tasks to mint URLs that
//! grant one HTTP operation on one object for one hour.

#![deny(clippy::all, missing_docs, dead_code)]

mod config;
mod error;
mod legacy;
mod method;
mod signer;

pub use config::{SignerAlgorithm, SignerConfig, DEFAULT_REGION};
pub use error::{SignerError, SignerResult};
pub use method::HttpMethod;
pub use signer::{PresignedUrl, UrlSigner, ATTACHMENT_CONTENT_TYPE, PRESIGNED_URL_TTL};
