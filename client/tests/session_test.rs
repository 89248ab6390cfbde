//! Integration tests for the session store and the route guard.

mod common;

use std::sync::Arc;

use client::api::BearerSlot;
use client::session::guard::{self, RouteDecision};
use client::session::models::{LoginOutcome, SessionState};
use client::session::store::SessionStore;
use client::storage::{MemoryTokenStore, TokenStore};
use common::{StubApi, expired_token, live_token};

fn setup(stored_token: Option<String>) -> (Arc<StubApi>, Arc<MemoryTokenStore>, BearerSlot, SessionStore) {
    let api = Arc::new(StubApi::default());
    let tokens = Arc::new(match stored_token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    });
    let bearer = BearerSlot::new();
    let store = SessionStore::new(api.clone(), tokens.clone(), bearer.clone());
    (api, tokens, bearer, store)
}

#[test]
fn fresh_store_is_checking_and_guard_shows_loading() {
    let (_, _, _, store) = setup(None);
    assert!(matches!(store.state(), SessionState::Checking));
    assert_eq!(guard::evaluate(store.state()), RouteDecision::Loading);
}

#[test]
fn missing_token_resolves_to_unauthenticated() {
    let (_, _, bearer, mut store) = setup(None);
    store.check_auth();
    assert!(matches!(store.state(), SessionState::Unauthenticated));
    assert!(!bearer.is_armed());
}

#[test]
fn expired_token_is_cleared_on_startup() {
    let (_, tokens, bearer, mut store) = setup(Some(expired_token("ana")));
    store.check_auth();

    assert!(matches!(store.state(), SessionState::Unauthenticated));
    assert_eq!(tokens.load(), None);
    assert!(!bearer.is_armed());
}

#[test]
fn undecodable_token_is_cleared_and_check_is_idempotent() {
    let (_, tokens, bearer, mut store) = setup(Some("not-a-jwt".to_string()));
    store.check_auth();
    assert!(matches!(store.state(), SessionState::Unauthenticated));
    assert_eq!(tokens.load(), None);

    // Second run sees no token and stays unauthenticated.
    store.check_auth();
    assert!(matches!(store.state(), SessionState::Unauthenticated));
    assert!(!bearer.is_armed());
}

#[test]
fn live_token_restores_the_session() {
    let token = live_token("ana");
    let (_, tokens, bearer, mut store) = setup(Some(token.clone()));
    store.check_auth();

    match store.state() {
        SessionState::Authenticated(claims) => assert_eq!(claims.username(), "ana"),
        other => panic!("expected Authenticated, got {other:?}"),
    }
    assert_eq!(bearer.token(), Some(token.clone()));
    assert_eq!(tokens.load(), Some(token));
    assert_eq!(guard::evaluate(store.state()), RouteDecision::Render);
}

#[tokio::test]
async fn login_then_logout_round_trip() {
    let (api, tokens, bearer, mut store) = setup(None);
    let token = live_token("ana");
    *api.login_token.lock().unwrap() = Some(token.clone());
    store.check_auth();

    let outcome = store.login("ana", "secret").await;
    assert_eq!(outcome, LoginOutcome::Success);
    assert_eq!(tokens.load(), Some(token.clone()));
    assert_eq!(bearer.token(), Some(token));
    assert_eq!(guard::evaluate(store.state()), RouteDecision::Render);

    store.logout();
    assert_eq!(tokens.load(), None);
    assert!(!bearer.is_armed());
    assert_eq!(
        guard::evaluate(store.state()),
        RouteDecision::RedirectToLogin
    );
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_message() {
    let (api, _, bearer, mut store) = setup(None);
    *api.login_error.lock().unwrap() = Some("Bad credentials".to_string());
    store.check_auth();

    let outcome = store.login("ana", "wrong").await;
    assert_eq!(
        outcome,
        LoginOutcome::Failure {
            message: "Bad credentials".to_string()
        }
    );
    assert!(matches!(store.state(), SessionState::Unauthenticated));
    assert!(!bearer.is_armed());
}

#[tokio::test]
async fn rejected_login_without_payload_uses_the_generic_message() {
    let (_, _, _, mut store) = setup(None);
    let outcome = store.login("ana", "wrong").await;
    assert_eq!(
        outcome,
        LoginOutcome::Failure {
            message: "Unable to sign in".to_string()
        }
    );
}

#[tokio::test]
async fn blank_credentials_never_reach_the_network() {
    let (api, _, _, mut store) = setup(None);
    store.check_auth();

    let outcome = store.login("", "").await;
    assert!(matches!(outcome, LoginOutcome::Failure { .. }));
    assert_eq!(
        api.calls.login.load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn undecodable_login_token_leaves_the_session_unauthenticated() {
    let (api, tokens, bearer, mut store) = setup(None);
    *api.login_token.lock().unwrap() = Some("not-a-jwt".to_string());
    store.check_auth();

    let outcome = store.login("ana", "secret").await;
    assert!(matches!(outcome, LoginOutcome::Failure { .. }));
    assert!(matches!(store.state(), SessionState::Unauthenticated));
    assert_eq!(tokens.load(), None);
    assert!(!bearer.is_armed());
}
