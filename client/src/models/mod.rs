//! Rust structs that represent the backend's wire-level data.
//!
//! These models mirror the JSON shapes the clinic API produces and consumes.
//! Draft records carry the per-field validation rules the forms apply before
//! any save request is issued; note that drafts may differ from the entity
//! shape the server returns.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ClientError, ClientResult};

/// Pet gender as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// Display label for the enum value.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

/// Owner record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    /// Embedded in the detail response; list responses may omit it.
    #[serde(default)]
    pub pets: Vec<Pet>,
}

/// Owner reference embedded in a pet record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    pub id: i64,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub id: i64,
    pub name: String,
}

/// A breed carries its species so breed choices can be narrowed client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breed {
    pub id: i64,
    pub name: String,
    pub species: Species,
}

/// Pet record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub color: Option<String>,
    pub weight_kg: Option<f64>,
    pub microchip: Option<String>,
    pub photo_url: Option<String>,
    pub owner: Option<OwnerRef>,
    pub species: Option<Species>,
    pub breed: Option<Breed>,
}

impl Pet {
    /// Age in whole years as of `today`, if the birth date is known.
    pub fn age_years(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?;
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age)
    }
}

/// Editable owner fields. Serializes directly as the save payload; the
/// `id` field is present only when updating.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name must be between 1-100 characters"
    ))]
    pub full_name: String,

    #[validate(length(min = 1, max = 20, message = "Phone must be between 1-20 characters"))]
    pub phone: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 100, message = "Email too long")
    )]
    pub email: Option<String>,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,

    pub notes: Option<String>,
}

impl OwnerDraft {
    /// Copy with blank optional text fields collapsed to `None` so optional
    /// rules do not fire on untouched inputs.
    pub fn normalized(&self) -> Self {
        OwnerDraft {
            email: blank_to_none(&self.email),
            address: blank_to_none(&self.address),
            notes: blank_to_none(&self.notes),
            ..self.clone()
        }
    }
}

impl From<&Owner> for OwnerDraft {
    fn from(owner: &Owner) -> Self {
        OwnerDraft {
            id: Some(owner.id),
            full_name: owner.full_name.clone(),
            phone: owner.phone.clone(),
            email: owner.email.clone(),
            address: owner.address.clone(),
            notes: owner.notes.clone(),
        }
    }
}

/// Editable pet fields. References are held flat as ids while editing and
/// nested into the save payload by [`PetDraft::to_payload`].
#[derive(Debug, Clone, Default, Validate)]
pub struct PetDraft {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub name: String,

    #[validate(required(message = "Owner is required"))]
    pub owner_id: Option<i64>,

    #[validate(required(message = "Species is required"))]
    pub species_id: Option<i64>,

    pub breed_id: Option<i64>,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: Option<NaiveDate>,

    #[validate(required(message = "Gender is required"))]
    pub gender: Option<Gender>,

    #[validate(length(max = 50, message = "Color must be at most 50 characters"))]
    pub color: Option<String>,

    #[validate(custom(function = "validate_weight"))]
    pub weight_kg: Option<f64>,

    #[validate(length(max = 50, message = "Microchip must be at most 50 characters"))]
    pub microchip: Option<String>,

    #[validate(length(max = 255, message = "Photo URL must be at most 255 characters"))]
    pub photo_url: Option<String>,
}

impl PetDraft {
    /// Copy with blank optional text fields collapsed to `None`.
    pub fn normalized(&self) -> Self {
        PetDraft {
            color: blank_to_none(&self.color),
            microchip: blank_to_none(&self.microchip),
            photo_url: blank_to_none(&self.photo_url),
            ..self.clone()
        }
    }

    /// Build the save payload, nesting the flat reference ids the way the
    /// backend expects them.
    pub fn to_payload(&self) -> ClientResult<SavePet> {
        let owner = self
            .owner_id
            .map(|id| IdRef { id })
            .ok_or_else(|| ClientError::validation("Owner is required"))?;
        let species = self
            .species_id
            .map(|id| IdRef { id })
            .ok_or_else(|| ClientError::validation("Species is required"))?;
        let gender = self
            .gender
            .ok_or_else(|| ClientError::validation("Gender is required"))?;

        Ok(SavePet {
            id: self.id,
            name: self.name.clone(),
            owner,
            species,
            breed: self.breed_id.map(|id| IdRef { id }),
            birth_date: self.birth_date,
            gender,
            color: self.color.clone(),
            weight_kg: self.weight_kg,
            microchip: self.microchip.clone(),
            photo_url: self.photo_url.clone(),
        })
    }
}

impl From<&Pet> for PetDraft {
    fn from(pet: &Pet) -> Self {
        PetDraft {
            id: Some(pet.id),
            name: pet.name.clone(),
            owner_id: pet.owner.as_ref().map(|owner| owner.id),
            species_id: pet.species.as_ref().map(|species| species.id),
            breed_id: pet.breed.as_ref().map(|breed| breed.id),
            birth_date: pet.birth_date,
            gender: Some(pet.gender),
            color: pet.color.clone(),
            weight_kg: pet.weight_kg,
            microchip: pet.microchip.clone(),
            photo_url: pet.photo_url.clone(),
        }
    }
}

/// Reference wrapper used in save payloads.
#[derive(Debug, Clone, Serialize)]
pub struct IdRef {
    pub id: i64,
}

/// Pet save payload in the backend's upsert shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub owner: IdRef,
    pub species: IdRef,
    pub breed: Option<IdRef>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub color: Option<String>,
    pub weight_kg: Option<f64>,
    pub microchip: Option<String>,
    pub photo_url: Option<String>,
}

/// Validates that a birth date is not in the future
fn validate_birth_date(birth_date: &NaiveDate) -> Result<(), validator::ValidationError> {
    if *birth_date > Local::now().date_naive() {
        let mut error = validator::ValidationError::new("birth_date");
        error.message = Some("Birth date cannot be in the future".into());
        return Err(error);
    }
    Ok(())
}

/// Validates that a weight is positive and within the column bounds
fn validate_weight(weight_kg: f64) -> Result<(), validator::ValidationError> {
    if weight_kg <= 0.0 || weight_kg > 999.99 {
        let mut error = validator::ValidationError::new("weight_kg");
        error.message = Some("Weight must be positive and at most 999.99 kg".into());
        return Err(error);
    }
    Ok(())
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
