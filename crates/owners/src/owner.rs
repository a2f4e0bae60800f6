use petclinic_core::{Entity, OwnerId, PetId};

use crate::Pet;

/// Aggregate root: a pet owner.
///
/// # Invariants
/// - Every pet held by the owner has `owner_id() == self.id()`; `add_pet`,
///   `set_pets`, `assign_id` and the `edit_*` methods keep this true.
/// - Deleting the owner removes its pets and their visits (cascade is carried
///   out by the persistence layer).
#[derive(Debug, Clone, Default)]
pub struct Owner {
    id: Option<OwnerId>,
    first_name: Option<String>,
    last_name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    telephone: Option<String>,
    pets: Vec<Pet>,
}

impl Owner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn telephone(&self) -> Option<&str> {
        self.telephone.as_deref()
    }

    pub fn set_first_name(&mut self, value: Option<String>) {
        self.first_name = value;
    }

    pub fn set_last_name(&mut self, value: Option<String>) {
        self.last_name = value;
    }

    pub fn set_address(&mut self, value: Option<String>) {
        self.address = value;
    }

    pub fn set_city(&mut self, value: Option<String>) {
        self.city = value;
    }

    pub fn set_telephone(&mut self, value: Option<String>) {
        self.telephone = value;
    }

    /// Assign the persisted identifier and re-stamp every pet's back-reference.
    pub fn assign_id(&mut self, id: OwnerId) {
        self.id = Some(id);
        for pet in &mut self.pets {
            pet.set_owner_id(self.id);
        }
    }

    /// Pets in insertion order.
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Edit one held pet in place. Returns `None` when no pet has that id.
    ///
    /// The pet stays attached to this owner whatever `f` does to it.
    pub fn edit_pet<R>(&mut self, id: PetId, f: impl FnOnce(&mut Pet) -> R) -> Option<R> {
        let owner_id = self.id;
        let pet = self.pets.iter_mut().find(|p| p.id() == Some(id))?;
        let out = f(pet);
        pet.set_owner_id(owner_id);
        Some(out)
    }

    /// Run `f` over every held pet in insertion order, stopping at the first
    /// error. Back-references are re-stamped before and after each call.
    pub fn try_edit_pets<E>(&mut self, mut f: impl FnMut(&mut Pet) -> Result<(), E>) -> Result<(), E> {
        let owner_id = self.id;
        for pet in &mut self.pets {
            pet.set_owner_id(owner_id);
            let result = f(pet);
            pet.set_owner_id(owner_id);
            result?;
        }
        Ok(())
    }

    pub fn pet(&self, id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id() == Some(id))
    }

    /// Find a pet by name (case-insensitive), optionally skipping unsaved pets.
    pub fn pet_by_name(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        self.pets
            .iter()
            .filter(|p| !(ignore_new && p.is_new()))
            .find(|p| p.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    pub fn add_pet(&mut self, mut pet: Pet) {
        pet.set_owner_id(self.id);
        self.pets.push(pet);
    }

    /// Replace all pets, attaching each one to this owner.
    pub fn set_pets(&mut self, pets: Vec<Pet>) {
        self.pets.clear();
        for pet in pets {
            self.add_pet(pet);
        }
    }
}

impl Entity for Owner {
    type Id = OwnerId;

    fn id(&self) -> Option<OwnerId> {
        self.id
    }
}

impl PartialEq for Owner {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}
