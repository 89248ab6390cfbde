//! In-memory gateway stub and fixtures shared by the integration tests.
//!
//! The stub keeps canned collections behind the real `VetApi` trait,
//! counts every call per operation, and can be toggled to fail specific
//! operations, so tests can assert exactly which requests a controller
//! issued.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use client::api::VetApi;
use client::errors::{ClientError, ClientResult};
use client::models::{Breed, Gender, Owner, OwnerDraft, OwnerRef, Pet, SavePet, Species};
use client::session::models::{LoginRequest, LoginResponse};
use client::utils::jwt::Claims;
use jsonwebtoken::{EncodingKey, Header, encode};

#[derive(Default)]
pub struct CallLog {
    pub login: AtomicUsize,
    pub list_owners: AtomicUsize,
    pub save_owner: AtomicUsize,
    pub delete_owner: AtomicUsize,
    pub list_pets: AtomicUsize,
    pub save_pet: AtomicUsize,
    pub delete_pet: AtomicUsize,
    pub list_species: AtomicUsize,
    pub list_breeds: AtomicUsize,
}

#[derive(Default)]
pub struct StubApi {
    pub owners: Mutex<Vec<Owner>>,
    pub pets: Mutex<Vec<Pet>>,
    pub species: Mutex<Vec<Species>>,
    pub breeds: Mutex<Vec<Breed>>,
    /// Token returned by `login`; `None` makes login fail with a 401.
    pub login_token: Mutex<Option<String>>,
    /// Server-side message attached to the 401 login failure.
    pub login_error: Mutex<Option<String>>,
    pub calls: CallLog,
    pub fail_list_owners: AtomicBool,
    pub fail_list_pets: AtomicBool,
    pub fail_list_species: AtomicBool,
    pub fail_list_breeds: AtomicBool,
    pub fail_save: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl StubApi {
    pub fn fail(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }

    fn failure() -> ClientError {
        ClientError::request(500, None)
    }
}

fn next_id<T>(rows: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    rows.iter().map(&id_of).max().unwrap_or(0) + 1
}

#[async_trait]
impl VetApi for StubApi {
    async fn login(&self, _request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.calls.login.fetch_add(1, Ordering::SeqCst);
        match self.login_token.lock().unwrap().clone() {
            Some(token) => Ok(LoginResponse { token }),
            None => Err(ClientError::request(
                401,
                self.login_error.lock().unwrap().clone(),
            )),
        }
    }

    async fn list_owners(&self) -> ClientResult<Vec<Owner>> {
        self.calls.list_owners.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_owners.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(self.owners.lock().unwrap().clone())
    }

    async fn find_owner(&self, id: i64) -> ClientResult<Owner> {
        self.owners
            .lock()
            .unwrap()
            .iter()
            .find(|owner| owner.id == id)
            .cloned()
            .ok_or_else(|| ClientError::request(404, Some("Owner not found".to_string())))
    }

    async fn save_owner(&self, draft: &OwnerDraft) -> ClientResult<Owner> {
        self.calls.save_owner.fetch_add(1, Ordering::SeqCst);
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        let mut owners = self.owners.lock().unwrap();
        let id = draft.id.unwrap_or_else(|| next_id(&owners, |o| o.id));
        let saved = Owner {
            id,
            full_name: draft.full_name.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            address: draft.address.clone(),
            notes: draft.notes.clone(),
            pets: Vec::new(),
        };
        owners.retain(|owner| owner.id != id);
        owners.push(saved.clone());
        Ok(saved)
    }

    async fn delete_owner(&self, id: i64) -> ClientResult<()> {
        self.calls.delete_owner.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        self.owners.lock().unwrap().retain(|owner| owner.id != id);
        Ok(())
    }

    async fn list_pets(&self) -> ClientResult<Vec<Pet>> {
        self.calls.list_pets.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_pets.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(self.pets.lock().unwrap().clone())
    }

    async fn find_pet(&self, id: i64) -> ClientResult<Pet> {
        self.pets
            .lock()
            .unwrap()
            .iter()
            .find(|pet| pet.id == id)
            .cloned()
            .ok_or_else(|| ClientError::request(404, Some("Pet not found".to_string())))
    }

    async fn save_pet(&self, payload: &SavePet) -> ClientResult<Pet> {
        self.calls.save_pet.fetch_add(1, Ordering::SeqCst);
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        let owner = self
            .owners
            .lock()
            .unwrap()
            .iter()
            .find(|owner| owner.id == payload.owner.id)
            .map(|owner| OwnerRef {
                id: owner.id,
                full_name: owner.full_name.clone(),
            });
        let species = self
            .species
            .lock()
            .unwrap()
            .iter()
            .find(|species| species.id == payload.species.id)
            .cloned();
        let breed = payload.breed.as_ref().and_then(|breed_ref| {
            self.breeds
                .lock()
                .unwrap()
                .iter()
                .find(|breed| breed.id == breed_ref.id)
                .cloned()
        });

        let mut pets = self.pets.lock().unwrap();
        let id = payload.id.unwrap_or_else(|| next_id(&pets, |p| p.id));
        let saved = Pet {
            id,
            name: payload.name.clone(),
            birth_date: payload.birth_date,
            gender: payload.gender,
            color: payload.color.clone(),
            weight_kg: payload.weight_kg,
            microchip: payload.microchip.clone(),
            photo_url: payload.photo_url.clone(),
            owner,
            species,
            breed,
        };
        pets.retain(|pet| pet.id != id);
        pets.push(saved.clone());
        Ok(saved)
    }

    async fn delete_pet(&self, id: i64) -> ClientResult<()> {
        self.calls.delete_pet.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        self.pets.lock().unwrap().retain(|pet| pet.id != id);
        Ok(())
    }

    async fn list_species(&self) -> ClientResult<Vec<Species>> {
        self.calls.list_species.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_species.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(self.species.lock().unwrap().clone())
    }

    async fn list_breeds(&self) -> ClientResult<Vec<Breed>> {
        self.calls.list_breeds.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_breeds.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(self.breeds.lock().unwrap().clone())
    }
}

pub fn owner(id: i64, full_name: &str, phone: &str, email: Option<&str>) -> Owner {
    Owner {
        id,
        full_name: full_name.to_string(),
        phone: phone.to_string(),
        email: email.map(str::to_string),
        address: None,
        notes: None,
        pets: Vec::new(),
    }
}

pub fn species(id: i64, name: &str) -> Species {
    Species {
        id,
        name: name.to_string(),
    }
}

pub fn breed(id: i64, name: &str, species: &Species) -> Breed {
    Breed {
        id,
        name: name.to_string(),
        species: species.clone(),
    }
}

pub fn pet(id: i64, name: &str, owner: &Owner, species: &Species, breed: Option<&Breed>) -> Pet {
    Pet {
        id,
        name: name.to_string(),
        birth_date: None,
        gender: Gender::Unknown,
        color: None,
        weight_kg: None,
        microchip: None,
        photo_url: None,
        owner: Some(OwnerRef {
            id: owner.id,
            full_name: owner.full_name.clone(),
        }),
        species: Some(species.clone()),
        breed: breed.cloned(),
    }
}

/// A signed token the client can decode; the secret is irrelevant since the
/// client never verifies signatures.
pub fn token_with_exp(sub: &str, exp: i64) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        iat: Some(Utc::now().timestamp() as usize),
        exp: exp as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

pub fn live_token(sub: &str) -> String {
    token_with_exp(sub, Utc::now().timestamp() + 3600)
}

pub fn expired_token(sub: &str) -> String {
    token_with_exp(sub, Utc::now().timestamp() - 60)
}
