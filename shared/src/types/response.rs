//! API response envelopes

use serde::{Deserialize, Serialize};

/// Success envelope: `{ "code": 200, "status": "OK", "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultResponse<T> {
    /// HTTP status code
    pub code: u16,

    /// Canonical reason phrase of `code`
    pub status: String,

    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> DefaultResponse<T> {
    /// Create a response carrying data
    pub fn new(code: u16, status: impl Into<String>, data: T) -> Self {
        Self {
            code,
            status: status.into(),
            data: Some(data),
        }
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl DefaultResponse<()> {
    /// Create a response without payload
    pub fn empty(code: u16, status: impl Into<String>) -> Self {
        Self {
            code,
            status: status.into(),
            data: None,
        }
    }
}

/// Failure envelope: `{ "code": 404, "status": "NOT FOUND", "errors": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub code: u16,

    /// Upper-cased reason phrase of `code`
    pub status: String,

    /// Human readable message or structured field errors
    pub errors: serde_json::Value,
}

impl ErrorResponse {
    /// Create an error response with a message
    pub fn new(code: u16, status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            status: status.into(),
            errors: serde_json::Value::String(message.into()),
        }
    }

    /// Create an error response with structured details
    pub fn with_details(code: u16, status: impl Into<String>, details: impl Serialize) -> Self {
        let errors = serde_json::to_value(details).unwrap_or(serde_json::Value::Null);
        Self {
            code,
            status: status.into(),
            errors,
        }
    }
}
