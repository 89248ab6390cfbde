//! Create-or-edit dialog controller shared by the owner and pet forms.
//!
//! The generic controller owns the draft, runs the field rules before any
//! network call, and keeps entered values on failure so the user can retry.
//! The pet variant layers reference data (owners, species, breeds) and the
//! species-dependent breed filtering on top.

use std::sync::Arc;

use tracing::{error, warn};
use validator::Validate;

use crate::api::VetApi;
use crate::controllers::{Entity, FormDraft, capitalize, load_failure_message, save_failure_message};
use crate::models::{Breed, Owner, Pet, PetDraft, Species};
use crate::notify::Notice;

/// Field-specific validation failure shown inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome<E> {
    /// The backend accepted the save; the dialog can close and the caller
    /// re-fetches its list.
    Saved(E),
    /// Client-side validation rejected the draft; no request was issued.
    Invalid,
    /// The save request failed; field values are kept for retry.
    Failed,
}

/// Dialog controller for creating or editing one entity.
pub struct FormController<E: Entity> {
    api: Arc<dyn VetApi>,
    draft: E::Draft,
    seed: E::Draft,
    editing: bool,
    field_errors: Vec<FieldError>,
    saving: bool,
    notices: Vec<Notice>,
}

impl<E: Entity> FormController<E> {
    /// Controller for creating a new record.
    pub fn for_new(api: Arc<dyn VetApi>) -> Self {
        Self::seeded(api, E::Draft::default(), false)
    }

    /// Controller editing an existing record, seeded from its fields.
    pub fn for_edit(api: Arc<dyn VetApi>, entity: &E) -> Self {
        Self::seeded(api, entity.draft(), true)
    }

    fn seeded(api: Arc<dyn VetApi>, seed: E::Draft, editing: bool) -> Self {
        FormController {
            api,
            draft: seed.clone(),
            seed,
            editing,
            field_errors: Vec::new(),
            saving: false,
            notices: Vec::new(),
        }
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut E::Draft {
        &mut self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// True while a save request is in flight; the submit surface is
    /// disabled for as long as this holds.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Message for one field, if it failed validation on the last submit.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Validate and save. At most one save request is in flight at a time;
    /// `&mut self` makes an overlapping submit unrepresentable.
    pub async fn submit(&mut self) -> SubmitOutcome<E> {
        self.draft = self.draft.normalized();

        if let Err(errors) = self.draft.validate() {
            self.field_errors = flatten_errors(&errors);
            return SubmitOutcome::Invalid;
        }
        self.field_errors.clear();

        self.saving = true;
        let result = E::save(self.api.as_ref(), &self.draft).await;
        self.saving = false;

        match result {
            Ok(saved) => {
                let action = if self.editing { "updated" } else { "created" };
                self.notices.push(Notice::success(format!(
                    "{} {action} successfully",
                    capitalize(E::SINGULAR)
                )));
                self.draft = self.seed.clone();
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                error!("saving {} failed: {e}", E::SINGULAR);
                self.notices
                    .push(Notice::error(save_failure_message(&e, E::SINGULAR, self.editing)));
                SubmitOutcome::Failed
            }
        }
    }
}

/// Formats validator errors into field-specific error details.
fn flatten_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .unwrap_or(&"Invalid value".into())
                    .to_string(),
            })
        })
        .collect()
}

/// Pet dialog controller: the generic form plus reference data handling.
pub struct PetFormController {
    inner: FormController<Pet>,
    owners: Vec<Owner>,
    species: Vec<Species>,
    breeds: Vec<Breed>,
}

impl PetFormController {
    pub fn for_new(api: Arc<dyn VetApi>) -> Self {
        Self::wrap(FormController::for_new(api))
    }

    /// New-pet dialog opened from an owner's detail screen: the owner field
    /// is pre-populated from that context but stays editable.
    pub fn for_new_with_owner(api: Arc<dyn VetApi>, owner_id: i64) -> Self {
        let seed = PetDraft {
            owner_id: Some(owner_id),
            ..PetDraft::default()
        };
        Self::wrap(FormController::seeded(api, seed, false))
    }

    pub fn for_edit(api: Arc<dyn VetApi>, pet: &Pet) -> Self {
        Self::wrap(FormController::for_edit(api, pet))
    }

    fn wrap(inner: FormController<Pet>) -> Self {
        PetFormController {
            inner,
            owners: Vec::new(),
            species: Vec::new(),
            breeds: Vec::new(),
        }
    }

    /// Fetch owners, species, and breeds concurrently.
    ///
    /// A failing fetch is reported as a notice and leaves its option list
    /// empty; the other lists still populate and the form stays usable.
    pub async fn load_reference_data(&mut self) {
        let api = self.inner.api.clone();
        let (owners, species, breeds) =
            futures::join!(api.list_owners(), api.list_species(), api.list_breeds());

        match owners {
            Ok(owners) => self.owners = owners,
            Err(e) => {
                warn!("loading owners for the pet form failed: {e}");
                self.inner
                    .notices
                    .push(Notice::error(load_failure_message(&e, "owners")));
            }
        }
        match species {
            Ok(species) => self.species = species,
            Err(e) => {
                warn!("loading species for the pet form failed: {e}");
                self.inner
                    .notices
                    .push(Notice::error(load_failure_message(&e, "species")));
            }
        }
        match breeds {
            Ok(breeds) => self.breeds = breeds,
            Err(e) => {
                warn!("loading breeds for the pet form failed: {e}");
                self.inner
                    .notices
                    .push(Notice::error(load_failure_message(&e, "breeds")));
            }
        }
    }

    pub fn owner_options(&self) -> &[Owner] {
        &self.owners
    }

    pub fn species_options(&self) -> &[Species] {
        &self.species
    }

    /// Breed choices narrowed to the currently selected species; empty
    /// until a species is chosen.
    pub fn breed_options(&self) -> Vec<&Breed> {
        let Some(species_id) = self.inner.draft.species_id else {
            return Vec::new();
        };
        self.breeds
            .iter()
            .filter(|breed| breed.species.id == species_id)
            .collect()
    }

    /// Change the species; any chosen breed is cleared since it may not
    /// belong to the new species.
    pub fn select_species(&mut self, species_id: Option<i64>) {
        self.inner.draft.species_id = species_id;
        self.inner.draft.breed_id = None;
    }

    pub fn select_breed(&mut self, breed_id: Option<i64>) {
        self.inner.draft.breed_id = breed_id;
    }

    pub fn draft(&self) -> &PetDraft {
        self.inner.draft()
    }

    pub fn draft_mut(&mut self) -> &mut PetDraft {
        self.inner.draft_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.inner.is_editing()
    }

    pub fn is_saving(&self) -> bool {
        self.inner.is_saving()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        self.inner.field_errors()
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.inner.field_error(field)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.inner.take_notices()
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Pet> {
        self.inner.submit().await
    }
}
