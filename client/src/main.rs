//! Main entry point for the clinic client shell.
//!
//! This file wires configuration, the REST gateway, and the session store,
//! runs the startup token check, and drives a minimal login-and-list pass.
//! It stands in for the UI shell that consumes the controllers.

use std::sync::Arc;

use client::api::BearerSlot;
use client::api::rest::RestGateway;
use client::config::Config;
use client::controllers::list::ListController;
use client::models::{Owner, Pet};
use client::session::guard::{self, RouteDecision};
use client::session::models::LoginOutcome;
use client::session::store::SessionStore;
use client::storage::FileTokenStore;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let bearer = BearerSlot::new();
    let gateway = Arc::new(RestGateway::new(&config, bearer.clone()).unwrap());
    let tokens = Arc::new(FileTokenStore::new(&config.token_file));
    let mut session = SessionStore::new(gateway.clone(), tokens, bearer);

    session.check_auth();

    if guard::evaluate(session.state()) == RouteDecision::RedirectToLogin {
        let username = std::env::var("CLINIC_USERNAME").unwrap_or_default();
        let password = std::env::var("CLINIC_PASSWORD").unwrap_or_default();
        match session.login(&username, &password).await {
            LoginOutcome::Success => info!("signed in as {username}"),
            LoginOutcome::Failure { message } => {
                error!("login failed: {message}");
                return;
            }
        }
    }

    let mut owners = ListController::<Owner>::new(gateway.clone());
    owners.refresh().await;
    for notice in owners.take_notices() {
        warn!("{}", notice.message);
    }
    info!("{} owners on file", owners.rows().len());

    let mut pets = ListController::<Pet>::new(gateway);
    pets.refresh().await;
    for notice in pets.take_notices() {
        warn!("{}", notice.message);
    }
    info!("{} pets on file", pets.rows().len());
}
