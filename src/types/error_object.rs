use serde::{Deserialize, Serialize};

/// The body OpenAI returns alongside a non-success status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error details.
    pub error: ErrorObject,
}

/// Details of an API error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Human-readable description of the error.
    #[serde(default)]
    pub message: String,

    /// Error category, e.g. `invalid_request_error`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// The request parameter the error relates to.
    #[serde(default)]
    pub param: Option<String>,

    /// Machine-readable code, e.g. `invalid_api_key`.
    #[serde(default)]
    pub code: Option<String>,
}
