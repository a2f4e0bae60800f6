//! Persistence collaborator contracts.
//!
//! One trait per entity type. Implementations provide:
//!
//! - **Lookup by id / by field**: a single row (or a not-found error) and lists.
//! - **Save**: insert-or-update; a first save assigns the generated identifier
//!   to the entity passed in (and cascades to owned children).
//! - **Delete**: removal by entity, cascading to owned children.
//!
//! Each call is one atomic unit of work.

use thiserror::Error;

use petclinic_auth::User;
use petclinic_core::{OwnerId, PetId, PetTypeId, SpecialtyId, VetId, VisitId};
use petclinic_owners::{Owner, Pet, PetType, Visit};
use petclinic_vets::{Specialty, Vet};

/// Repository operation error.
///
/// ## Error Categories
///
/// - **ObjectRetrievalFailure / EmptyResult**: the two shapes of "no such row".
///   Lookup tables raise the former, query-backed lookups the latter.
/// - **TransientReference**: a saved entity references a shared row that was
///   never persisted.
/// - **IntegrityViolation**: a saved entity references a row that does not exist.
/// - **Unavailable**: the store itself cannot be used (e.g. poisoned lock).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("object of class [{entity}] with identifier [{id}] not found")]
    ObjectRetrievalFailure { entity: &'static str, id: String },

    #[error("incorrect result size for {0}: expected 1, actual 0")]
    EmptyResult(&'static str),

    #[error("{entity} references an unsaved {referenced}")]
    TransientReference {
        entity: &'static str,
        referenced: &'static str,
    },

    #[error("integrity constraint violated: {0}")]
    IntegrityViolation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Whether this error only signals that the requested row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepositoryError::ObjectRetrievalFailure { .. } | RepositoryError::EmptyResult(_)
        )
    }
}

pub trait OwnerRepository: Send + Sync {
    fn find_by_id(&self, id: OwnerId) -> Result<Owner, RepositoryError>;
    /// Owners whose last name starts with `last_name`.
    fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Owner>, RepositoryError>;
    fn save(&self, owner: &mut Owner) -> Result<(), RepositoryError>;
    fn delete(&self, owner: &Owner) -> Result<(), RepositoryError>;
}

pub trait PetRepository: Send + Sync {
    fn find_by_id(&self, id: PetId) -> Result<Pet, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Pet>, RepositoryError>;
    /// All pet types, ordered by name.
    fn find_pet_types(&self) -> Result<Vec<PetType>, RepositoryError>;
    fn save(&self, pet: &mut Pet) -> Result<(), RepositoryError>;
    fn delete(&self, pet: &Pet) -> Result<(), RepositoryError>;
}

pub trait VisitRepository: Send + Sync {
    fn find_by_id(&self, id: VisitId) -> Result<Visit, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Visit>, RepositoryError>;
    fn find_by_pet_id(&self, pet_id: PetId) -> Result<Vec<Visit>, RepositoryError>;
    fn save(&self, visit: &mut Visit) -> Result<(), RepositoryError>;
    fn delete(&self, visit: &Visit) -> Result<(), RepositoryError>;
}

pub trait PetTypeRepository: Send + Sync {
    fn find_by_id(&self, id: PetTypeId) -> Result<PetType, RepositoryError>;
    fn find_all(&self) -> Result<Vec<PetType>, RepositoryError>;
    fn save(&self, pet_type: &mut PetType) -> Result<(), RepositoryError>;
    /// Deleting a pet type also deletes every pet of that type and their visits.
    fn delete(&self, pet_type: &PetType) -> Result<(), RepositoryError>;
}

pub trait SpecialtyRepository: Send + Sync {
    fn find_by_id(&self, id: SpecialtyId) -> Result<Specialty, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Specialty>, RepositoryError>;
    fn save(&self, specialty: &mut Specialty) -> Result<(), RepositoryError>;
    /// Deleting a specialty also unlinks it from every vet.
    fn delete(&self, specialty: &Specialty) -> Result<(), RepositoryError>;
}

pub trait VetRepository: Send + Sync {
    fn find_by_id(&self, id: VetId) -> Result<Vet, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Vet>, RepositoryError>;
    fn save(&self, vet: &mut Vet) -> Result<(), RepositoryError>;
    fn delete(&self, vet: &Vet) -> Result<(), RepositoryError>;
}

pub trait UserRepository: Send + Sync {
    fn find_by_username(&self, username: &str) -> Result<User, RepositoryError>;
    fn save(&self, user: &mut User) -> Result<(), RepositoryError>;
}
