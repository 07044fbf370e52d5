//! Client error types.

use thiserror::Error;
use wayfarer_core::storage::RepositoryError;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Client not configured: {0}")]
    NotConfigured(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for RepositoryError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) if e.is_connect() || e.is_timeout() => {
                RepositoryError::ConnectionFailed(e.to_string())
            }
            ClientError::Request(e) if e.is_decode() => {
                RepositoryError::Serialization(e.to_string())
            }
            ClientError::Request(e) => RepositoryError::QueryFailed(e.to_string()),
            ClientError::ServerError { status, message } => {
                RepositoryError::QueryFailed(format!("Server returned {status}: {message}"))
            }
            ClientError::NotConfigured(reason) => RepositoryError::NotConfigured(reason),
            ClientError::Json(e) => RepositoryError::Serialization(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_to_query_failed() {
        let err = ClientError::ServerError {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(
            RepositoryError::from(err),
            RepositoryError::QueryFailed("Server returned 401: Invalid API key".to_string())
        );
    }

    #[test]
    fn test_not_configured_maps_through() {
        let err = ClientError::NotConfigured("SUPABASE_URL is not set".to_string());
        assert_eq!(
            RepositoryError::from(err),
            RepositoryError::NotConfigured("SUPABASE_URL is not set".to_string())
        );
    }
}
