//! `petclinic-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no wire formats).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OwnerId, PetId, PetTypeId, RoleId, SpecialtyId, VetId, VisitId};
