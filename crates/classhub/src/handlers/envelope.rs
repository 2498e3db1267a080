//! the uniform json response envelope.
//!
//! every endpoint renders `{success, message?, data?}`; errors render
//! `{success: false, message}` with no data.

use serde::Serialize;

/// success envelope carrying a payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// always `true` for this type.
    pub success: bool,
    /// optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// envelope with data and no message.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// envelope with data and a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// envelope with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// always `false` for this type.
    pub success: bool,
    /// what went wrong.
    pub message: String,
}

impl ErrorBody {
    /// build a failure envelope.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
