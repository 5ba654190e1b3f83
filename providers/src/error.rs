//! Error taxonomy shared by every adapter.
//!
//! Dozens of provider statuses and payload shapes collapse into three kinds. Only
//! [`ErrorKind::InvalidInput`] is recoverable: the dialog step may be retried. The other two
//! abort the active dialog.

use thiserror::Error;

/// Classified failure of a provider call. The message is human-readable and never carries raw payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The provider understood the request but rejected its content (unknown locality, unconvertible pair).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider rejected the credentials.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Transport failure, timeout, malformed or absent body, or any status not classified otherwise.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Kind of a [`ServiceError`] without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    AccessDenied,
    ServiceUnavailable,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidInput(_) => ErrorKind::InvalidInput,
            ServiceError::AccessDenied(_) => ErrorKind::AccessDenied,
            ServiceError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// True when the user may retry the same step without the dialog being reset.
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::InvalidInput(m)
            | ServiceError::AccessDenied(m)
            | ServiceError::ServiceUnavailable(m) => m,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::ServiceUnavailable("The request has timed out.".to_string())
        } else if err.is_decode() {
            ServiceError::ServiceUnavailable("Bad or absent data in the response.".to_string())
        } else {
            ServiceError::ServiceUnavailable(format!("Transport error: {}", err))
        }
    }
}

/// Result of a provider call.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
