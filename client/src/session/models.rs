//! Data structures for session-related entities.
//!
//! This module defines models for the login exchange and the client's
//! authentication state, used for data transfer and internal representation
//! within the session flow.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::jwt::Claims;

/// Login request payload
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing the session token
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Authentication state of the client.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// The startup token check has not completed yet.
    Checking,
    Unauthenticated,
    Authenticated(Claims),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Result of a login attempt, carrying display text on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { message: String },
}
