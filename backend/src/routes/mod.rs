/// Attachment upload allocation and download locations
pub mod attachments;
pub mod service;

use aide::axum::{routing::get, ApiRouter};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(service::handler())
        .api_route(
            "/v1/attachments/upload",
            get(attachments::allocate_upload),
        )
        .api_route(
            "/v1/attachments/{attachment_id}",
            get(attachments::get_download_location),
        )
}
