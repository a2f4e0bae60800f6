//! Vets domain module (veterinarians and their specialties).
//!
//! `Specialty` is a shared lookup entity: vets reference specialties without
//! owning them, and specialties carry no back-reference to vets.

pub mod specialty;
pub mod vet;

pub use specialty::Specialty;
pub use vet::Vet;
