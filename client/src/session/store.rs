//! Core business logic for the session lifecycle.
//!
//! The store owns the authentication state machine and is the single writer
//! of both the persisted token and the bearer slot the gateway reads.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::api::{BearerSlot, VetApi};
use crate::errors::ClientError;
use crate::session::models::{LoginOutcome, LoginRequest, SessionState};
use crate::storage::TokenStore;
use crate::utils::jwt;

const LOGIN_FAILED_MESSAGE: &str = "Unable to sign in";

/// Session service handling login, logout, and the startup token check
pub struct SessionStore {
    api: Arc<dyn VetApi>,
    tokens: Arc<dyn TokenStore>,
    bearer: BearerSlot,
    state: SessionState,
}

impl SessionStore {
    /// Create a new SessionStore instance.
    ///
    /// The store starts in `Checking`; callers run [`SessionStore::check_auth`]
    /// once at startup to resolve it.
    pub fn new(api: Arc<dyn VetApi>, tokens: Arc<dyn TokenStore>, bearer: BearerSlot) -> Self {
        SessionStore {
            api,
            tokens,
            bearer,
            state: SessionState::Checking,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Startup token check.
    ///
    /// A missing, undecodable, or expired token reverts the session to
    /// unauthenticated and clears the stored value; calling this again on a
    /// cleared store is a no-op. A live token arms the bearer slot.
    pub fn check_auth(&mut self) {
        let Some(token) = self.tokens.load() else {
            self.state = SessionState::Unauthenticated;
            return;
        };

        match jwt::decode_claims(&token) {
            Ok(claims) if claims.is_expired() => {
                info!(user = %claims.sub, "stored token expired, clearing session");
                self.discard_session();
            }
            Ok(claims) => {
                self.bearer.arm(&token);
                info!(user = %claims.sub, "session restored from stored token");
                self.state = SessionState::Authenticated(claims);
            }
            Err(e) => {
                warn!("stored token could not be decoded: {e}");
                self.discard_session();
            }
        }
    }

    /// Authenticate against the backend and arm the session on success.
    ///
    /// Failures carry a message suitable for the login screen, preferring
    /// the server's error payload over the generic fallback.
    pub async fn login(&mut self, username: &str, password: &str) -> LoginOutcome {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        if request.validate().is_err() {
            return LoginOutcome::Failure {
                message: "Username and password are required".to_string(),
            };
        }

        match self.api.login(&request).await {
            Ok(response) => match jwt::decode_claims(&response.token) {
                Ok(claims) => {
                    if let Err(e) = self.tokens.save(&response.token) {
                        warn!("could not persist session token: {e}");
                    }
                    self.bearer.arm(&response.token);
                    info!(user = %claims.sub, "login succeeded");
                    self.state = SessionState::Authenticated(claims);
                    LoginOutcome::Success
                }
                Err(e) => {
                    warn!("login returned an undecodable token: {e}");
                    self.discard_session();
                    LoginOutcome::Failure {
                        message: LOGIN_FAILED_MESSAGE.to_string(),
                    }
                }
            },
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                LoginOutcome::Failure {
                    message: login_failure_message(&e),
                }
            }
        }
    }

    /// Drop the session unconditionally. No server call is made.
    pub fn logout(&mut self) {
        self.discard_session();
        info!("logged out");
    }

    fn discard_session(&mut self) {
        if let Err(e) = self.tokens.clear() {
            warn!("could not clear stored token: {e}");
        }
        self.bearer.disarm();
        self.state = SessionState::Unauthenticated;
    }
}

/// Display text for a failed login, preferring the server's message.
fn login_failure_message(error: &ClientError) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string())
}
