//! Infrastructure layer: persistence contracts and their in-memory adapter.

pub mod repository;
pub mod store;

pub use repository::{
    OwnerRepository, PetRepository, PetTypeRepository, RepositoryError, SpecialtyRepository,
    UserRepository, VetRepository, VisitRepository,
};
pub use store::InMemoryClinicStore;
