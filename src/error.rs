use serde::Serialize;
use thiserror::Error;

/// Error category surfaced to MCP clients alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Bad, missing or out-of-range input, detected before any network call
    InvalidArgument,
    /// Unknown symbol, tool or resource
    NotFound,
    /// Operation needs API credentials that are not configured
    Unauthorized,
    /// Network failure, timeout or non-success HTTP status from Binance
    UpstreamError,
    /// Unexpected failure while reshaping upstream data
    InternalError,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Binance API error: {message}")]
    Upstream {
        /// HTTP status when the exchange answered, `None` for transport failures
        status: Option<u16>,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        ProviderError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ProviderError::NotFound(_) => ErrorKind::NotFound,
            ProviderError::Unauthorized(_) => ErrorKind::Unauthorized,
            ProviderError::Upstream { .. } => ErrorKind::UpstreamError,
            ProviderError::Internal(_) | ProviderError::Json(_) => ErrorKind::InternalError,
        }
    }

    /// Uniform `{kind, message}` body handed to the harness
    pub fn envelope(&self) -> ErrorEnvelope {
        let status = match self {
            ProviderError::Upstream { status, .. } => *status,
            _ => None,
        };

        ErrorEnvelope {
            kind: self.kind(),
            message: self.to_string(),
            status,
        }
    }
}

/// Serialized form of a failed tool call or resource read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::upstream(
                None,
                "Request to Binance API timed out. Please check your internet connection.",
            )
        } else if err.is_connect() {
            ProviderError::upstream(
                None,
                "Failed to connect to Binance API. Please check your internet connection.",
            )
        } else if let Some(status) = err.status() {
            ProviderError::upstream(Some(status.as_u16()), format!("HTTP error: {}", status))
        } else {
            ProviderError::upstream(None, err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(feature = "mcp_server")]
impl From<ProviderError> for rmcp::model::ErrorData {
    fn from(err: ProviderError) -> Self {
        let envelope = err.envelope();
        let data = serde_json::to_value(&envelope).ok();

        match envelope.kind {
            ErrorKind::InvalidArgument => Self::invalid_params(envelope.message, data),
            ErrorKind::NotFound => Self::resource_not_found(envelope.message, data),
            ErrorKind::Unauthorized => Self::invalid_request(envelope.message, data),
            ErrorKind::UpstreamError | ErrorKind::InternalError => {
                Self::internal_error(envelope.message, data)
            }
        }
    }
}
