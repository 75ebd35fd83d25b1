//! Errors surfaced by the backend HTTP client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the backends on non-2xx responses.
///
/// `detail` is usually a string, but validation failures carry a JSON list.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl ErrorBody {
    /// Renders `detail` as text, if present.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated{}", format_detail(.detail))]
    Unauthorized { detail: Option<String> },

    #[error("Request failed with status {status}{}", format_detail(.detail))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server supplied `detail` message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Builds an error from a non-success status and its raw body.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail_text());
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Status { status, detail }
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}
