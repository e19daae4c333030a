// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client error taxonomy.
//!
//! Every store action funnels its failures into [`ClientError`]. Actions whose
//! contract returns an HTTP status use [`ClientError::status`]; the `Display`
//! text is what the stores keep as their user-facing error message.

use reqwest::StatusCode;

use crate::config::ConfigError;
use crate::crypto::SignatureError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Authentication token not found")]
    MissingToken,

    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to read local storage: {0}")]
    StorageRead(StorageError),

    #[error("Failed to write local storage: {0}")]
    StorageWrite(StorageError),

    #[error("Failed to decode signature material: {0}")]
    SignatureDecode(#[from] SignatureError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Status code reported to callers that branch on a status.
    ///
    /// Non-HTTP failures collapse to `500`.
    pub fn status(&self) -> StatusCode {
        match self {
            ClientError::Http { status, .. } => *status,
            ClientError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ClientError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        ClientError::Http {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ClientError::InvalidInput(message.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ClientError::http(status, e.to_string()),
            None => ClientError::Network(e.to_string()),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_keep_their_status() {
        let err = ClientError::http(StatusCode::UNAUTHORIZED, "bad credentials");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "bad credentials");
    }

    #[test]
    fn non_http_errors_map_to_500() {
        assert_eq!(
            ClientError::MissingToken.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ClientError::Network("connection refused".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ClientError::StorageWrite(StorageError::NotInitialized).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ClientError::Cancelled.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn input_and_lookup_errors_have_client_statuses() {
        assert_eq!(
            ClientError::invalid_input("email is required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClientError::NotFound("document doc-1".to_string()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
