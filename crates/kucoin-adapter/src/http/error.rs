/*
[INPUT]:  Error sources (configuration, encoding, transport, envelope, API codes)
[OUTPUT]: Structured error types with kind classification and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or recognising new API codes
*/

use thiserror::Error;

/// Business codes signalling a rejected key, signature or passphrase
const AUTH_ERROR_CODES: [&str; 4] = ["400001", "400003", "400004", "400005"];
/// Business code for a `KC-API-TIMESTAMP` outside the accepted window
const CLOCK_SKEW_CODE: &str = "400002";
const RATE_LIMIT_CODE: &str = "429000";

/// Main error type for the KuCoin adapter
#[derive(Error, Debug)]
pub enum KucoinError {
    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Request URL could not be built
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A path or query parameter is not usable as-is
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Call did not complete within its timeout
    #[error("Request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Call was cancelled by the caller
    #[error("Request cancelled")]
    Cancelled,

    /// Response body is not a valid envelope
    #[error("Invalid response (HTTP {status}): {message}; body: {body}")]
    Decode {
        status: u16,
        message: String,
        body: String,
    },

    /// API returned a business error
    #[error("API error (code {code}): {message}")]
    Api { code: String, message: String },
}

/// Coarse classification of [`KucoinError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Serialization,
    Transport,
    Decode,
    Business,
}

impl KucoinError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KucoinError::Config(_) => ErrorKind::Configuration,
            KucoinError::Serialization(_)
            | KucoinError::UrlParse(_)
            | KucoinError::InvalidParameter { .. } => ErrorKind::Serialization,
            KucoinError::Http(_) | KucoinError::Timeout { .. } | KucoinError::Cancelled => {
                ErrorKind::Transport
            }
            KucoinError::Decode { .. } => ErrorKind::Decode,
            KucoinError::Api { .. } => ErrorKind::Business,
        }
    }

    /// Check if the error is a transport failure.
    ///
    /// Only idempotent operations should be retried; the client itself never
    /// retries.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Business error code, if the server rejected the request
    pub fn api_code(&self) -> Option<&str> {
        match self {
            KucoinError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        self.api_code()
            .is_some_and(|code| AUTH_ERROR_CODES.contains(&code))
    }

    /// Check if the server rejected the request timestamp.
    ///
    /// Calling the operation again signs with a fresh timestamp.
    pub fn is_clock_skew(&self) -> bool {
        self.api_code() == Some(CLOCK_SKEW_CODE)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.api_code() == Some(RATE_LIMIT_CODE)
    }

    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        KucoinError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for KuCoin operations
pub type Result<T> = std::result::Result<T, KucoinError>;
