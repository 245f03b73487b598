//! Request/response tuple types (§3).

use serde::{Deserialize, Serialize};

/// A request sent over the link: `(correlation_id, action, params)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    pub correlation_id: u8,
    pub action: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Transport-independent status carried in a response's own JSON body, kept
/// distinct from the frame header's `Status` byte per §3 ("on mismatch the
/// transport status wins").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// A response received over the link: `(correlation_id, status, data |
/// error_message)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub correlation_id: u8,
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Response {
    pub fn ok(correlation_id: u8, data: serde_json::Value) -> Self {
        Self {
            correlation_id,
            status: ResponseStatus::Ok,
            data: Some(data),
            error_message: None,
        }
    }

    pub fn error(correlation_id: u8, message: impl Into<String>) -> Self {
        Self {
            correlation_id,
            status: ResponseStatus::Error,
            data: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}
