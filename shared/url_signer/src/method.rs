use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// HTTP methods a presigned URL can authorize
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read the object
    Get,
    /// Upload the object
    Put,
    /// Read the object metadata
    Head,
    /// Remove the object
    Delete,
}
