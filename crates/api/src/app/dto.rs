//! Wire DTOs.
//!
//! Every entity has a full DTO (what the server returns) and, where clients
//! may create or edit it, a `*FieldsDto` carrying only the client-writable
//! attributes. Structural constraints live on the DTOs and are checked with
//! `validator` before anything reaches the mapping layer.
//!
//! Wire identifiers are plain integers; `0` stands for "not assigned yet".

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

static LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]*$").expect("valid pattern"));
static VET_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]{1,50}$").expect("valid pattern"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*$").expect("valid pattern"));

/// A DTO that can be reported on in a binding-errors payload.
pub trait BindingTarget: Validate {
    /// Object name used in field errors (`ownerFieldsDto`, `petDto`, ...).
    const OBJECT_NAME: &'static str;
}

macro_rules! binding_target {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(impl BindingTarget for $t {
            const OBJECT_NAME: &'static str = $name;
        })*
    };
}

binding_target! {
    OwnerDto => "ownerDto",
    OwnerFieldsDto => "ownerFieldsDto",
    PetDto => "petDto",
    PetFieldsDto => "petFieldsDto",
    PetTypeDto => "petTypeDto",
    PetTypeFieldsDto => "petTypeFieldsDto",
    SpecialtyDto => "specialtyDto",
    VetDto => "vetDto",
    VetFieldsDto => "vetFieldsDto",
    VisitDto => "visitDto",
    VisitFieldsDto => "visitFieldsDto",
    UserDto => "userDto",
}

// -------------------------
// Owners
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    #[validate(
        length(min = 1, max = 30, message = "size must be between 1 and 30"),
        regex(path = *LETTERS, message = "must match \"[a-zA-Z]*\"")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 30, message = "size must be between 1 and 30"),
        regex(path = *LETTERS, message = "must match \"[a-zA-Z]*\"")
    )]
    pub last_name: String,
    #[validate(length(min = 1, max = 255, message = "size must be between 1 and 255"))]
    pub address: String,
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub city: String,
    #[validate(
        length(min = 1, max = 20, message = "size must be between 1 and 20"),
        regex(path = *DIGITS, message = "must match \"[0-9]*\"")
    )]
    pub telephone: String,
    /// Read-only: pets and their visits.
    #[serde(default)]
    #[validate(nested)]
    pub pets: Vec<PetDto>,
    #[serde(default)]
    pub id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnerFieldsDto {
    #[validate(
        length(min = 1, max = 30, message = "size must be between 1 and 30"),
        regex(path = *LETTERS, message = "must match \"[a-zA-Z]*\"")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 30, message = "size must be between 1 and 30"),
        regex(path = *LETTERS, message = "must match \"[a-zA-Z]*\"")
    )]
    pub last_name: String,
    #[validate(length(min = 1, max = 255, message = "size must be between 1 and 255"))]
    pub address: String,
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub city: String,
    #[validate(
        length(min = 1, max = 20, message = "size must be between 1 and 20"),
        regex(path = *DIGITS, message = "must match \"[0-9]*\"")
    )]
    pub telephone: String,
}

// -------------------------
// Pets
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PetDto {
    #[validate(length(max = 30, message = "size must be between 0 and 30"))]
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(rename = "type", default)]
    #[validate(nested)]
    pub pet_type: Option<PetTypeDto>,
    #[serde(default)]
    pub id: u32,
    /// Read-only: newest first.
    #[serde(default)]
    #[validate(nested)]
    pub visits: Vec<VisitDto>,
    #[serde(default)]
    pub owner_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PetFieldsDto {
    #[validate(length(max = 30, message = "size must be between 0 and 30"))]
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(rename = "type")]
    #[validate(nested)]
    pub pet_type: PetTypeDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PetTypeDto {
    #[serde(default)]
    pub id: u32,
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PetTypeFieldsDto {
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub name: String,
}

// -------------------------
// Visits
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VisitDto {
    #[validate(length(min = 1, max = 255, message = "size must be between 1 and 255"))]
    pub description: String,
    #[serde(default)]
    pub id: u32,
    /// Defaults to today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub pet_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VisitFieldsDto {
    #[validate(length(min = 1, max = 255, message = "size must be between 1 and 255"))]
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

// -------------------------
// Vets
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VetDto {
    #[validate(
        length(min = 1, max = 50, message = "size must be between 1 and 50"),
        regex(path = *VET_NAME, message = "must match \"[a-zA-Z]{1,50}\"")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 50, message = "size must be between 1 and 50"),
        regex(path = *VET_NAME, message = "must match \"[a-zA-Z]{1,50}\"")
    )]
    pub last_name: String,
    /// Sorted by name.
    #[validate(nested)]
    pub specialties: Vec<SpecialtyDto>,
    #[serde(default)]
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VetFieldsDto {
    #[validate(
        length(min = 1, max = 30, message = "size must be between 1 and 30"),
        regex(path = *LETTERS, message = "must match \"^[a-zA-Z]*$\"")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 30, message = "size must be between 1 and 30"),
        regex(path = *LETTERS, message = "must match \"^[a-zA-Z]*$\"")
    )]
    pub last_name: String,
    #[validate(nested)]
    pub specialties: Vec<SpecialtyDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SpecialtyDto {
    #[serde(default)]
    pub id: u32,
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub name: String,
}

// -------------------------
// Users
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserDto {
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub password: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    #[validate(nested)]
    pub roles: Option<Vec<RoleDto>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RoleDto {
    #[validate(length(min = 1, max = 80, message = "size must be between 1 and 80"))]
    pub name: String,
}
