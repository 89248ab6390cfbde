//! Reusable screen controllers behind the owner and pet CRUD surfaces.
//!
//! Both management screens share the same interaction pattern: a list with
//! free-text filtering and a delete-confirmation step, and a create-or-edit
//! dialog that validates client-side before saving. The controllers here
//! implement that pattern once, generalized over [`Entity`].

pub mod form;
pub mod list;

use async_trait::async_trait;
use validator::Validate;

use crate::api::VetApi;
use crate::errors::{ClientError, ClientResult};
use crate::models::{Owner, OwnerDraft, Pet, PetDraft};

/// Editable record behind an entity form.
pub trait FormDraft: Validate + Clone + Default + Send + Sync {
    /// Present when editing an existing record.
    fn id(&self) -> Option<i64>;
    /// Copy with blank optional text fields collapsed to `None`.
    fn normalized(&self) -> Self;
}

/// A managed entity: its wire shape, its draft, and its gateway operations.
#[async_trait]
pub trait Entity: Clone + Send + Sync + 'static {
    type Draft: FormDraft;

    /// Singular noun used in notices ("owner", "pet").
    const SINGULAR: &'static str;
    /// Plural noun used in notices ("owners", "pets").
    const PLURAL: &'static str;

    fn id(&self) -> i64;
    /// Name shown when confirming deletion of this record.
    fn display_name(&self) -> &str;
    /// Case-insensitive match against the entity's searchable fields;
    /// `needle` is already lowercased.
    fn matches(&self, needle: &str) -> bool;
    /// Draft seeded from this record's current values.
    fn draft(&self) -> Self::Draft;

    async fn fetch_all(api: &dyn VetApi) -> ClientResult<Vec<Self>>;
    async fn save(api: &dyn VetApi, draft: &Self::Draft) -> ClientResult<Self>;
    async fn delete(api: &dyn VetApi, id: i64) -> ClientResult<()>;
}

impl FormDraft for OwnerDraft {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn normalized(&self) -> Self {
        OwnerDraft::normalized(self)
    }
}

impl FormDraft for PetDraft {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn normalized(&self) -> Self {
        PetDraft::normalized(self)
    }
}

#[async_trait]
impl Entity for Owner {
    type Draft = OwnerDraft;

    const SINGULAR: &'static str = "owner";
    const PLURAL: &'static str = "owners";

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn matches(&self, needle: &str) -> bool {
        self.full_name.to_lowercase().contains(needle)
            || self
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(needle))
            || self.phone.to_lowercase().contains(needle)
    }

    fn draft(&self) -> OwnerDraft {
        OwnerDraft::from(self)
    }

    async fn fetch_all(api: &dyn VetApi) -> ClientResult<Vec<Owner>> {
        api.list_owners().await
    }

    async fn save(api: &dyn VetApi, draft: &OwnerDraft) -> ClientResult<Owner> {
        api.save_owner(draft).await
    }

    async fn delete(api: &dyn VetApi, id: i64) -> ClientResult<()> {
        api.delete_owner(id).await
    }
}

#[async_trait]
impl Entity for Pet {
    type Draft = PetDraft;

    const SINGULAR: &'static str = "pet";
    const PLURAL: &'static str = "pets";

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .owner
                .as_ref()
                .is_some_and(|owner| owner.full_name.to_lowercase().contains(needle))
            || self
                .species
                .as_ref()
                .is_some_and(|species| species.name.to_lowercase().contains(needle))
            || self
                .breed
                .as_ref()
                .is_some_and(|breed| breed.name.to_lowercase().contains(needle))
    }

    fn draft(&self) -> PetDraft {
        PetDraft::from(self)
    }

    async fn fetch_all(api: &dyn VetApi) -> ClientResult<Vec<Pet>> {
        api.list_pets().await
    }

    async fn save(api: &dyn VetApi, draft: &PetDraft) -> ClientResult<Pet> {
        api.save_pet(&draft.to_payload()?).await
    }

    async fn delete(api: &dyn VetApi, id: i64) -> ClientResult<()> {
        api.delete_pet(id).await
    }
}

/// Notice text for a failed load, preferring the server's message.
pub(crate) fn load_failure_message(error: &ClientError, what: &str) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Error loading {what}"))
}

/// Notice text for a failed save, preferring the server's message.
pub(crate) fn save_failure_message(error: &ClientError, singular: &str, editing: bool) -> String {
    error.server_message().map(str::to_string).unwrap_or_else(|| {
        let action = if editing { "updating" } else { "creating" };
        format!("Error {action} {singular}")
    })
}

/// Notice text for a failed delete, preferring the server's message.
pub(crate) fn delete_failure_message(error: &ClientError, singular: &str) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Error deleting {singular}"))
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
