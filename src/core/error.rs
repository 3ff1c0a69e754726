use serde::Serialize;
use thiserror::Error;

/// Message used when a request never received a response
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: unable to reach the server";

/// Message used when the server failed without explaining why
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// The `{message, status}` shape surfaced to the user for any failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl AppError {
    /// HTTP status of a server-reported error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        let message = match self {
            AppError::Network(msg) => msg.clone(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        ErrorPayload {
            message,
            status: self.status(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<lopdf::Error> for AppError {
    fn from(error: lopdf::Error) -> Self {
        AppError::Pdf(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_keeps_server_message_and_status() {
        let err = AppError::Api {
            status: 409,
            message: "Island already used by a group".to_string(),
        };
        let payload = err.payload();
        assert_eq!(payload.message, "Island already used by a group");
        assert_eq!(payload.status, Some(409));
    }

    #[test]
    fn test_payload_for_network_error_has_no_status() {
        let err = AppError::Network(NETWORK_ERROR_MESSAGE.to_string());
        let payload = err.payload();
        assert_eq!(payload.message, NETWORK_ERROR_MESSAGE);
        assert_eq!(payload.status, None);
    }
}
