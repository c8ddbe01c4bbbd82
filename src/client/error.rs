// Client errors
//
// Transport failures are kept typed so the UI can classify them into the
// six user-facing error kinds without looking at message text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to reach {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Request to {url} was cancelled")]
    Cancelled { url: String },

    #[error("API request failed: {status} {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Failed to parse response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ClientError {
    /// Classify a reqwest failure for `url`
    pub fn from_reqwest(url: &str, err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ClientError::Timeout {
                url: url.to_string(),
                timeout_secs,
            }
        } else if err.is_decode() {
            ClientError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            ClientError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network { .. } => ErrorKind::Network,
            ClientError::Timeout { .. } | ClientError::Cancelled { .. } => ErrorKind::Timeout,
            ClientError::Status { status, .. } => match *status {
                401 | 403 => ErrorKind::Auth,
                404 => ErrorKind::Api,
                s if s >= 500 => ErrorKind::Server,
                _ => ErrorKind::Unknown,
            },
            ClientError::Decode { .. } => ErrorKind::Unknown,
        }
    }
}

/// User-facing error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Network,
    Auth,
    Api,
    Server,
    Timeout,
    Unknown,
}

impl ErrorKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ErrorKind::Api => "🔌",
            ErrorKind::Network => "🌐",
            ErrorKind::Auth => "🔐",
            ErrorKind::Timeout => "⏱️",
            ErrorKind::Server => "🖥️",
            ErrorKind::Unknown => "⚠️",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::Api => "API Connection Issue",
            ErrorKind::Network => "Network Connectivity Problem",
            ErrorKind::Auth => "Authentication Error",
            ErrorKind::Timeout => "Request Timeout",
            ErrorKind::Server => "Server Error",
            ErrorKind::Unknown => "Unexpected Error",
        }
    }

    /// Canned explanation shown in the recovery panel
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Unable to connect to the demo server. This might be due to network issues or server unavailability.",
            ErrorKind::Auth => "Authentication failed. Please check your API credentials or contact support.",
            ErrorKind::Api => "API endpoint not found. The demo server may not be properly configured.",
            ErrorKind::Server => "The demo server is experiencing issues. This is temporary and should resolve shortly.",
            ErrorKind::Timeout => "The request timed out. The server may be busy processing your request.",
            ErrorKind::Unknown => "An unexpected error occurred during the demo. Please try again or switch to demo mode.",
        }
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            ErrorKind::Api => &[
                "Check if the MCP server is running",
                "Verify API endpoints are accessible",
                "Switch to demo mode for presentation",
            ],
            ErrorKind::Network => &[
                "Check your internet connection",
                "Try refreshing the page",
                "Use demo mode for offline presentation",
            ],
            ErrorKind::Auth => &[
                "Verify API credentials are configured",
                "Check authentication tokens",
                "Contact administrator for access",
            ],
            ErrorKind::Timeout => &[
                "Server may be experiencing high load",
                "Try again in a few moments",
                "Use demo mode for immediate presentation",
            ],
            ErrorKind::Server => &[
                "Server is temporarily unavailable",
                "Check server logs for details",
                "Switch to demo mode for presentation",
            ],
            ErrorKind::Unknown => &[
                "Try refreshing the page",
                "Check browser console for details",
                "Use demo mode as fallback",
            ],
        }
    }
}
