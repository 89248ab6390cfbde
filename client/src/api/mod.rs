//! Typed client operations over the clinic's REST API.
//!
//! One operation per remote call. Every operation attaches the current
//! bearer token when one is armed; failures carry the HTTP status and the
//! server's message, and callers are responsible for user-facing
//! translation. No retries and no caching — each call is a single round
//! trip surfaced immediately to the caller.

pub mod rest;

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::errors::ClientResult;
use crate::models::{Breed, Owner, OwnerDraft, Pet, SavePet, Species};
use crate::session::models::{LoginRequest, LoginResponse};

/// Shared slot holding the bearer token attached to outgoing requests.
///
/// The gateway reads it on every request; only the session store writes it.
#[derive(Clone, Default)]
pub struct BearerSlot(Arc<RwLock<Option<String>>>);

impl BearerSlot {
    pub fn new() -> Self {
        BearerSlot::default()
    }

    /// Make `token` available to all subsequent requests.
    pub fn arm(&self, token: &str) {
        *self
            .0
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
    }

    /// Stop attaching a token to outgoing requests.
    pub fn disarm(&self) {
        *self
            .0
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_armed(&self) -> bool {
        self.token().is_some()
    }
}

/// Remote operations exposed by the clinic backend.
#[async_trait]
pub trait VetApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    async fn list_owners(&self) -> ClientResult<Vec<Owner>>;
    async fn find_owner(&self, id: i64) -> ClientResult<Owner>;
    async fn save_owner(&self, owner: &OwnerDraft) -> ClientResult<Owner>;
    async fn delete_owner(&self, id: i64) -> ClientResult<()>;

    async fn list_pets(&self) -> ClientResult<Vec<Pet>>;
    async fn find_pet(&self, id: i64) -> ClientResult<Pet>;
    async fn save_pet(&self, pet: &SavePet) -> ClientResult<Pet>;
    async fn delete_pet(&self, id: i64) -> ClientResult<()>;

    async fn list_species(&self) -> ClientResult<Vec<Species>>;
    async fn list_breeds(&self) -> ClientResult<Vec<Breed>>;
}
