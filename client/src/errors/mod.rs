//! Client-wide error types.
//!
//! This module defines the error taxonomy shared by the API gateway, the
//! session store, and the screen controllers, and provides mechanisms for
//! consistent error handling and user-facing message selection.

use thiserror::Error;

/// Generic client error used across the gateway and controllers
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client-side validation failed before any network call was made.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Login was rejected or the stored session is no longer usable.
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// The server answered with a non-2xx status.
    #[error("Request failed with status {status}")]
    Request { status: u16, message: Option<String> },

    /// The stored token could not be decoded.
    #[error("Token decode error: {reason}")]
    TokenDecode { reason: String },

    /// The request never produced an HTTP response.
    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn request(status: u16, message: Option<String>) -> Self {
        Self::Request { status, message }
    }

    pub fn token_decode(reason: impl Into<String>) -> Self {
        Self::TokenDecode {
            reason: reason.into(),
        }
    }

    /// The server-supplied message, when the failure carried one.
    ///
    /// Notices prefer this text over the generic per-operation fallback.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Request { message, .. } => message.as_deref(),
            ClientError::Auth { message } => Some(message),
            _ => None,
        }
    }
}
