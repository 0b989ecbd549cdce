//! Error types for REST API operations

use cryptomkt_auth::{AuthError, ClockError};
use serde::Deserialize;

use crate::types::PaymentStatus;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Could not reach the server (connect, DNS, timeout, TLS)
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Request URL
        url: String,
        /// Underlying cause
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a structured error
    #[error("API error ({kind}): {}", .error.message)]
    Api {
        /// Classification of the failure
        kind: ApiErrorKind,
        /// Body returned by the server
        error: ApiErrorBody,
    },

    /// Server answered with an error status and a body that is not an error object
    #[error("Could not parse {status} error body: {source}")]
    ErrorBody {
        /// HTTP status of the response
        status: u16,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Success body did not match the expected shape
    #[error("Could not decode response from {url}: {source}")]
    Decode {
        /// Request URL
        url: String,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Payment was decoded but carries a failed business status
    #[error("Payment {id} failed: {status}")]
    Payment {
        /// Payment order ID
        id: String,
        /// Business status reported by the server
        status: PaymentStatus,
    },

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Timestamp could not be obtained
    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),

    /// Credentials could not be built
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Client could not be built from its configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Which class of failure an [`RestError::Api`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400: request failed validation
    Validation,
    /// 401: missing or invalid signature / key
    Unauthorized,
    /// 403: key lacks permission
    Forbidden,
    /// 404: unknown resource
    NotFound,
    /// 429: too many requests
    RateLimited,
    /// 503: exchange unavailable
    Unavailable,
    /// 200 whose envelope reports `status: "error"`
    Rejected,
}

impl ApiErrorKind {
    /// Classification for an HTTP status, if it is one the API documents
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::Validation),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            429 => Some(Self::RateLimited),
            503 => Some(Self::Unavailable),
            _ => None,
        }
    }

    /// HTTP status this kind is reported with
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::Unavailable => 503,
            Self::Rejected => 200,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::RateLimited => "rate limited",
            Self::Unavailable => "unavailable",
            Self::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Error object returned by the API: `{id?, status?, message}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Error identifier (number or string depending on endpoint)
    #[serde(default)]
    pub id: Option<ErrorCode>,
    /// Status marker, usually `"error"`
    #[serde(default)]
    pub status: Option<String>,
    /// Human readable message
    pub message: String,
}

/// Error identifier as sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    /// Numeric code
    Number(i64),
    /// Textual code
    Text(String),
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl RestError {
    /// Error for a 200 envelope that reports `status: "error"`
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Api {
            kind: ApiErrorKind::Rejected,
            error: ApiErrorBody {
                id: None,
                status: Some("error".to_string()),
                message: message.into(),
            },
        }
    }

    /// HTTP status associated with this error, when there is one
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { kind, .. } => Some(kind.status()),
            Self::ErrorBody { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::Api {
                kind: ApiErrorKind::RateLimited,
                ..
            }
        ) || matches!(self, Self::ErrorBody { status: 429, .. })
    }

    /// Check if the server rejected the key or signature
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Api {
                kind: ApiErrorKind::Unauthorized | ApiErrorKind::Forbidden,
                ..
            }
        ) || matches!(self, Self::AuthRequired)
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
