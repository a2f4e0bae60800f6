//! Normalized row tables backing the in-memory store.
//!
//! Children reference parents by id and shared lookups (pet types,
//! specialties) live in their own tables, so a lookup row exists exactly once
//! no matter how many pets or vets reference it. Entity graphs are
//! materialized from rows on every read.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use petclinic_auth::{Role, User};
use petclinic_core::{Entity, OwnerId, PetId, PetTypeId, RoleId, SpecialtyId, VetId, VisitId};
use petclinic_owners::{Owner, Pet, PetType, Visit};
use petclinic_vets::{Specialty, Vet};

use crate::repository::RepositoryError;

/// Monotonic id generator for one table.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sequence(u32);

impl Sequence {
    /// Fails once the table's id space is used up instead of wrapping to an
    /// id that reads as unassigned.
    fn next(&mut self, table: &'static str) -> Result<u32, RepositoryError> {
        self.0 = self.0.checked_add(1).ok_or_else(|| {
            RepositoryError::IntegrityViolation(format!("{table} id sequence exhausted"))
        })?;
        Ok(self.0)
    }

    /// Keep the sequence ahead of an explicitly supplied id.
    fn observe(&mut self, id: u32) {
        self.0 = self.0.max(id);
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Sequences {
    owner: Sequence,
    pet: Sequence,
    visit: Sequence,
    pet_type: Sequence,
    specialty: Sequence,
    vet: Sequence,
    role: Sequence,
}

#[derive(Debug, Clone)]
pub(crate) struct OwnerRow {
    first_name: Option<String>,
    last_name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    telephone: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct PetRow {
    name: Option<String>,
    birth_date: Option<NaiveDate>,
    type_id: Option<PetTypeId>,
    owner_id: Option<OwnerId>,
}

#[derive(Debug, Clone)]
pub(crate) struct VisitRow {
    description: Option<String>,
    date: NaiveDate,
    pet_id: Option<PetId>,
}

#[derive(Debug, Clone)]
pub(crate) struct VetRow {
    first_name: Option<String>,
    last_name: Option<String>,
    specialty_ids: Vec<SpecialtyId>,
}

#[derive(Debug, Clone)]
pub(crate) struct RoleRow {
    id: RoleId,
    name: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct UserRow {
    password: Option<String>,
    enabled: Option<bool>,
    roles: Vec<RoleRow>,
}

/// All tables of the clinic schema.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    owners: BTreeMap<OwnerId, OwnerRow>,
    pets: BTreeMap<PetId, PetRow>,
    visits: BTreeMap<VisitId, VisitRow>,
    pet_types: BTreeMap<PetTypeId, Option<String>>,
    specialties: BTreeMap<SpecialtyId, Option<String>>,
    vets: BTreeMap<VetId, VetRow>,
    users: BTreeMap<String, UserRow>,
    sequences: Sequences,
}

// ─────────────────────────────────────────────────────────────────────────────
// Reads (row -> entity graph)
// ─────────────────────────────────────────────────────────────────────────────

impl Tables {
    pub(crate) fn owner(&self, id: OwnerId) -> Option<Owner> {
        let row = self.owners.get(&id)?;
        let mut owner = Owner::new();
        owner.set_first_name(row.first_name.clone());
        owner.set_last_name(row.last_name.clone());
        owner.set_address(row.address.clone());
        owner.set_city(row.city.clone());
        owner.set_telephone(row.telephone.clone());
        owner.assign_id(id);
        for (pet_id, _) in self.pets.iter().filter(|(_, p)| p.owner_id == Some(id)) {
            if let Some(pet) = self.pet(*pet_id) {
                owner.add_pet(pet);
            }
        }
        Some(owner)
    }

    pub(crate) fn owners(&self) -> Vec<Owner> {
        self.owners.keys().filter_map(|id| self.owner(*id)).collect()
    }

    pub(crate) fn owners_by_last_name(&self, prefix: &str) -> Vec<Owner> {
        self.owners
            .iter()
            .filter(|(_, row)| row.last_name.as_deref().is_some_and(|n| n.starts_with(prefix)))
            .filter_map(|(id, _)| self.owner(*id))
            .collect()
    }

    pub(crate) fn pet(&self, id: PetId) -> Option<Pet> {
        let row = self.pets.get(&id)?;
        let mut pet = Pet::new();
        pet.set_name(row.name.clone());
        pet.set_birth_date(row.birth_date);
        pet.set_pet_type(row.type_id.and_then(|t| self.pet_type(t)));
        if let Some(owner_id) = row.owner_id {
            pet.attach_to_owner(owner_id);
        }
        pet.assign_id(id);
        for visit in self.visits_of(id) {
            pet.add_visit(visit);
        }
        Some(pet)
    }

    pub(crate) fn all_pets(&self) -> Vec<Pet> {
        self.pets.keys().filter_map(|id| self.pet(*id)).collect()
    }

    pub(crate) fn visit(&self, id: VisitId) -> Option<Visit> {
        let row = self.visits.get(&id)?;
        let mut visit = Visit::new(row.date, row.description.clone());
        visit.assign_id(id);
        if let Some(pet_id) = row.pet_id {
            visit.attach_to_pet(pet_id);
        }
        Some(visit)
    }

    pub(crate) fn all_visits(&self) -> Vec<Visit> {
        self.visits.keys().filter_map(|id| self.visit(*id)).collect()
    }

    pub(crate) fn visits_of(&self, pet_id: PetId) -> Vec<Visit> {
        self.visits
            .iter()
            .filter(|(_, row)| row.pet_id == Some(pet_id))
            .filter_map(|(id, _)| self.visit(*id))
            .collect()
    }

    pub(crate) fn pet_type(&self, id: PetTypeId) -> Option<PetType> {
        let name = self.pet_types.get(&id)?;
        Some(PetType::with_id(id, name.clone()))
    }

    pub(crate) fn all_pet_types(&self) -> Vec<PetType> {
        self.pet_types.keys().filter_map(|id| self.pet_type(*id)).collect()
    }

    pub(crate) fn specialty(&self, id: SpecialtyId) -> Option<Specialty> {
        let name = self.specialties.get(&id)?;
        Some(Specialty::with_id(id, name.clone()))
    }

    pub(crate) fn all_specialties(&self) -> Vec<Specialty> {
        self.specialties.keys().filter_map(|id| self.specialty(*id)).collect()
    }

    pub(crate) fn vet(&self, id: VetId) -> Option<Vet> {
        let row = self.vets.get(&id)?;
        let mut vet = Vet::new();
        vet.set_first_name(row.first_name.clone());
        vet.set_last_name(row.last_name.clone());
        vet.assign_id(id);
        for specialty_id in &row.specialty_ids {
            if let Some(specialty) = self.specialty(*specialty_id) {
                vet.add_specialty(specialty);
            }
        }
        Some(vet)
    }

    pub(crate) fn all_vets(&self) -> Vec<Vet> {
        self.vets.keys().filter_map(|id| self.vet(*id)).collect()
    }

    pub(crate) fn user(&self, username: &str) -> Option<User> {
        let row = self.users.get(username)?;
        let mut user = User::new(username);
        user.set_password(row.password.clone());
        user.set_enabled(row.enabled);
        let roles = row
            .roles
            .iter()
            .map(|r| {
                let mut role = Role::new(r.name.clone());
                role.assign_id(r.id);
                role.attach_to_user(username);
                role
            })
            .collect();
        user.set_roles(roles);
        Some(user)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writes (entity graph -> rows)
// ─────────────────────────────────────────────────────────────────────────────

impl Tables {
    pub(crate) fn write_owner(&mut self, owner: &mut Owner) -> Result<(), RepositoryError> {
        let id = match owner.id() {
            Some(id) => {
                self.sequences.owner.observe(id.get());
                id
            }
            None => OwnerId::new(self.sequences.owner.next("owners")?),
        };
        owner.assign_id(id);
        self.owners.insert(
            id,
            OwnerRow {
                first_name: owner.first_name().map(str::to_owned),
                last_name: owner.last_name().map(str::to_owned),
                address: owner.address().map(str::to_owned),
                city: owner.city().map(str::to_owned),
                telephone: owner.telephone().map(str::to_owned),
            },
        );
        owner.try_edit_pets(|pet| self.write_pet(pet))
    }

    pub(crate) fn write_pet(&mut self, pet: &mut Pet) -> Result<(), RepositoryError> {
        let type_id = match pet.pet_type() {
            None => None,
            Some(pet_type) => {
                let type_id = pet_type.id().ok_or(RepositoryError::TransientReference {
                    entity: "Pet",
                    referenced: "PetType",
                })?;
                if !self.pet_types.contains_key(&type_id) {
                    return Err(RepositoryError::IntegrityViolation(format!(
                        "pet type {type_id} does not exist"
                    )));
                }
                Some(type_id)
            }
        };
        if let Some(owner_id) = pet.owner_id() {
            if !self.owners.contains_key(&owner_id) {
                return Err(RepositoryError::IntegrityViolation(format!(
                    "owner {owner_id} does not exist"
                )));
            }
        }

        let id = match pet.id() {
            Some(id) => {
                self.sequences.pet.observe(id.get());
                id
            }
            None => PetId::new(self.sequences.pet.next("pets")?),
        };
        pet.assign_id(id);
        self.pets.insert(
            id,
            PetRow {
                name: pet.name().map(str::to_owned),
                birth_date: pet.birth_date(),
                type_id,
                owner_id: pet.owner_id(),
            },
        );
        pet.try_edit_visits(|visit| self.write_visit(visit))
    }

    pub(crate) fn write_visit(&mut self, visit: &mut Visit) -> Result<(), RepositoryError> {
        if let Some(pet_id) = visit.pet_id() {
            if !self.pets.contains_key(&pet_id) {
                return Err(RepositoryError::IntegrityViolation(format!(
                    "pet {pet_id} does not exist"
                )));
            }
        }

        let id = match visit.id() {
            Some(id) => {
                self.sequences.visit.observe(id.get());
                id
            }
            None => VisitId::new(self.sequences.visit.next("visits")?),
        };
        visit.assign_id(id);
        self.visits.insert(
            id,
            VisitRow {
                description: visit.description().map(str::to_owned),
                date: visit.date(),
                pet_id: visit.pet_id(),
            },
        );
        Ok(())
    }

    pub(crate) fn write_pet_type(&mut self, pet_type: &mut PetType) -> Result<(), RepositoryError> {
        let id = match pet_type.id() {
            Some(id) => {
                self.sequences.pet_type.observe(id.get());
                id
            }
            None => PetTypeId::new(self.sequences.pet_type.next("pet_types")?),
        };
        pet_type.assign_id(id);
        self.pet_types.insert(id, pet_type.name().map(str::to_owned));
        Ok(())
    }

    pub(crate) fn write_specialty(&mut self, specialty: &mut Specialty) -> Result<(), RepositoryError> {
        let id = match specialty.id() {
            Some(id) => {
                self.sequences.specialty.observe(id.get());
                id
            }
            None => SpecialtyId::new(self.sequences.specialty.next("specialties")?),
        };
        specialty.assign_id(id);
        self.specialties.insert(id, specialty.name().map(str::to_owned));
        Ok(())
    }

    pub(crate) fn write_vet(&mut self, vet: &mut Vet) -> Result<(), RepositoryError> {
        let mut specialty_ids = Vec::with_capacity(vet.nr_of_specialties());
        for specialty in vet.specialties_internal() {
            let specialty_id = specialty.id().ok_or(RepositoryError::TransientReference {
                entity: "Vet",
                referenced: "Specialty",
            })?;
            if !self.specialties.contains_key(&specialty_id) {
                return Err(RepositoryError::IntegrityViolation(format!(
                    "specialty {specialty_id} does not exist"
                )));
            }
            specialty_ids.push(specialty_id);
        }

        let id = match vet.id() {
            Some(id) => {
                self.sequences.vet.observe(id.get());
                id
            }
            None => VetId::new(self.sequences.vet.next("vets")?),
        };
        vet.assign_id(id);
        self.vets.insert(
            id,
            VetRow {
                first_name: vet.first_name().map(str::to_owned),
                last_name: vet.last_name().map(str::to_owned),
                specialty_ids,
            },
        );
        Ok(())
    }

    pub(crate) fn write_user(&mut self, user: &mut User) -> Result<(), RepositoryError> {
        let mut roles = Vec::with_capacity(user.roles().len());
        for role in user.roles_mut() {
            let id = match role.id() {
                Some(id) => {
                    self.sequences.role.observe(id.get());
                    id
                }
                None => RoleId::new(self.sequences.role.next("roles")?),
            };
            role.assign_id(id);
            roles.push(RoleRow {
                id,
                name: role.name().map(str::to_owned),
            });
        }
        self.users.insert(
            user.username().to_owned(),
            UserRow {
                password: user.password().map(str::to_owned),
                enabled: user.enabled(),
                roles,
            },
        );
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Deletes (with cascades)
// ─────────────────────────────────────────────────────────────────────────────

impl Tables {
    pub(crate) fn remove_owner(&mut self, id: OwnerId) {
        self.owners.remove(&id);
        let pet_ids: Vec<PetId> = self
            .pets
            .iter()
            .filter(|(_, row)| row.owner_id == Some(id))
            .map(|(pet_id, _)| *pet_id)
            .collect();
        for pet_id in pet_ids {
            self.remove_pet(pet_id);
        }
    }

    pub(crate) fn remove_pet(&mut self, id: PetId) {
        self.pets.remove(&id);
        self.visits.retain(|_, row| row.pet_id != Some(id));
    }

    pub(crate) fn remove_visit(&mut self, id: VisitId) {
        self.visits.remove(&id);
    }

    /// Removes the type, then every pet of that type along with its visits.
    pub(crate) fn remove_pet_type(&mut self, id: PetTypeId) {
        self.pet_types.remove(&id);
        let pet_ids: Vec<PetId> = self
            .pets
            .iter()
            .filter(|(_, row)| row.type_id == Some(id))
            .map(|(pet_id, _)| *pet_id)
            .collect();
        for pet_id in pet_ids {
            self.remove_pet(pet_id);
        }
    }

    pub(crate) fn remove_specialty(&mut self, id: SpecialtyId) {
        self.specialties.remove(&id);
        for row in self.vets.values_mut() {
            row.specialty_ids.retain(|s| *s != id);
        }
    }

    pub(crate) fn remove_vet(&mut self, id: VetId) {
        self.vets.remove(&id);
    }
}
