//! Owners domain module (owners, their pets and the pets' visits).
//!
//! `Owner` is the aggregate root: it owns its pets, and every pet owns its
//! visits. Children point back to their parent by identifier only, and the
//! `add_*` / `attach_*` helpers are the only way to set those back-references.
//! `PetType` is a shared lookup entity referenced by pets, never owned.

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod visit;

pub use owner::Owner;
pub use pet::Pet;
pub use pet_type::PetType;
pub use visit::Visit;
