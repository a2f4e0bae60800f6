use std::sync::RwLock;

use petclinic_auth::User;
use petclinic_core::{Entity, OwnerId, PetId, PetTypeId, SpecialtyId, VetId, VisitId};
use petclinic_owners::{Owner, Pet, PetType, Visit};
use petclinic_vets::{Specialty, Vet};

use crate::repository::{
    OwnerRepository, PetRepository, PetTypeRepository, RepositoryError, SpecialtyRepository,
    UserRepository, VetRepository, VisitRepository,
};

use super::tables::Tables;

/// In-memory clinic store for tests/dev.
///
/// Every repository call is one critical section. Writes run against a staged
/// copy of the tables that only replaces the live tables when the whole
/// cascade succeeds, so a failed save leaves nothing behind.
#[derive(Debug, Default)]
pub struct InMemoryClinicStore {
    tables: RwLock<Tables>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        Ok(f(&*tables))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        let mut staged = tables.clone();
        let out = f(&mut staged)?;
        *tables = staged;
        Ok(out)
    }

    /// Run `write_fn` against a copy of `entity` and hand the ids it was given
    /// back to the caller's instance only once the write committed.
    fn save_with<E: Clone>(
        &self,
        entity: &mut E,
        write_fn: impl FnOnce(&mut Tables, &mut E) -> Result<(), RepositoryError>,
    ) -> Result<(), RepositoryError> {
        let mut working = entity.clone();
        self.write(|tables| write_fn(tables, &mut working))?;
        *entity = working;
        Ok(())
    }
}

fn not_found(entity: &'static str, id: impl ToString) -> RepositoryError {
    RepositoryError::ObjectRetrievalFailure {
        entity,
        id: id.to_string(),
    }
}

impl OwnerRepository for InMemoryClinicStore {
    fn find_by_id(&self, id: OwnerId) -> Result<Owner, RepositoryError> {
        self.read(|t| t.owner(id))?.ok_or_else(|| not_found("Owner", id))
    }

    fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, RepositoryError> {
        self.read(|t| t.owners_by_last_name(last_name))
    }

    fn find_all(&self) -> Result<Vec<Owner>, RepositoryError> {
        self.read(Tables::owners)
    }

    fn save(&self, owner: &mut Owner) -> Result<(), RepositoryError> {
        self.save_with(owner, Tables::write_owner)?;
        tracing::debug!(owner_id = ?owner.id(), pets = owner.pets().len(), "owner saved");
        Ok(())
    }

    fn delete(&self, owner: &Owner) -> Result<(), RepositoryError> {
        let Some(id) = owner.id() else { return Ok(()) };
        self.write(|t| {
            t.remove_owner(id);
            Ok(())
        })?;
        tracing::debug!(owner_id = %id, "owner deleted");
        Ok(())
    }
}

impl PetRepository for InMemoryClinicStore {
    fn find_by_id(&self, id: PetId) -> Result<Pet, RepositoryError> {
        self.read(|t| t.pet(id))?.ok_or_else(|| not_found("Pet", id))
    }

    fn find_all(&self) -> Result<Vec<Pet>, RepositoryError> {
        self.read(Tables::all_pets)
    }

    fn find_pet_types(&self) -> Result<Vec<PetType>, RepositoryError> {
        let mut types = self.read(Tables::all_pet_types)?;
        types.sort_by(|a, b| a.name().cmp(&b.name()));
        Ok(types)
    }

    fn save(&self, pet: &mut Pet) -> Result<(), RepositoryError> {
        self.save_with(pet, Tables::write_pet)?;
        tracing::debug!(pet_id = ?pet.id(), owner_id = ?pet.owner_id(), "pet saved");
        Ok(())
    }

    fn delete(&self, pet: &Pet) -> Result<(), RepositoryError> {
        let Some(id) = pet.id() else { return Ok(()) };
        self.write(|t| {
            t.remove_pet(id);
            Ok(())
        })?;
        tracing::debug!(pet_id = %id, "pet deleted");
        Ok(())
    }
}

impl VisitRepository for InMemoryClinicStore {
    fn find_by_id(&self, id: VisitId) -> Result<Visit, RepositoryError> {
        self.read(|t| t.visit(id))?.ok_or_else(|| not_found("Visit", id))
    }

    fn find_all(&self) -> Result<Vec<Visit>, RepositoryError> {
        self.read(Tables::all_visits)
    }

    fn find_by_pet_id(&self, pet_id: PetId) -> Result<Vec<Visit>, RepositoryError> {
        self.read(|t| t.visits_of(pet_id))
    }

    fn save(&self, visit: &mut Visit) -> Result<(), RepositoryError> {
        self.save_with(visit, Tables::write_visit)?;
        tracing::debug!(visit_id = ?visit.id(), pet_id = ?visit.pet_id(), "visit saved");
        Ok(())
    }

    fn delete(&self, visit: &Visit) -> Result<(), RepositoryError> {
        let Some(id) = visit.id() else { return Ok(()) };
        self.write(|t| {
            t.remove_visit(id);
            Ok(())
        })?;
        tracing::debug!(visit_id = %id, "visit deleted");
        Ok(())
    }
}

impl PetTypeRepository for InMemoryClinicStore {
    fn find_by_id(&self, id: PetTypeId) -> Result<PetType, RepositoryError> {
        self.read(|t| t.pet_type(id))?.ok_or_else(|| not_found("PetType", id))
    }

    fn find_all(&self) -> Result<Vec<PetType>, RepositoryError> {
        self.read(Tables::all_pet_types)
    }

    fn save(&self, pet_type: &mut PetType) -> Result<(), RepositoryError> {
        self.save_with(pet_type, Tables::write_pet_type)?;
        tracing::debug!(pet_type_id = ?pet_type.id(), "pet type saved");
        Ok(())
    }

    fn delete(&self, pet_type: &PetType) -> Result<(), RepositoryError> {
        let Some(id) = pet_type.id() else { return Ok(()) };
        self.write(|t| {
            t.remove_pet_type(id);
            Ok(())
        })?;
        tracing::debug!(pet_type_id = %id, "pet type deleted with dependent pets");
        Ok(())
    }
}

impl SpecialtyRepository for InMemoryClinicStore {
    fn find_by_id(&self, id: SpecialtyId) -> Result<Specialty, RepositoryError> {
        self.read(|t| t.specialty(id))?.ok_or_else(|| not_found("Specialty", id))
    }

    fn find_all(&self) -> Result<Vec<Specialty>, RepositoryError> {
        self.read(Tables::all_specialties)
    }

    fn save(&self, specialty: &mut Specialty) -> Result<(), RepositoryError> {
        self.save_with(specialty, Tables::write_specialty)?;
        tracing::debug!(specialty_id = ?specialty.id(), "specialty saved");
        Ok(())
    }

    fn delete(&self, specialty: &Specialty) -> Result<(), RepositoryError> {
        let Some(id) = specialty.id() else { return Ok(()) };
        self.write(|t| {
            t.remove_specialty(id);
            Ok(())
        })?;
        tracing::debug!(specialty_id = %id, "specialty deleted");
        Ok(())
    }
}

impl VetRepository for InMemoryClinicStore {
    fn find_by_id(&self, id: VetId) -> Result<Vet, RepositoryError> {
        self.read(|t| t.vet(id))?.ok_or_else(|| not_found("Vet", id))
    }

    fn find_all(&self) -> Result<Vec<Vet>, RepositoryError> {
        self.read(Tables::all_vets)
    }

    fn save(&self, vet: &mut Vet) -> Result<(), RepositoryError> {
        self.save_with(vet, Tables::write_vet)?;
        tracing::debug!(vet_id = ?vet.id(), specialties = vet.nr_of_specialties(), "vet saved");
        Ok(())
    }

    fn delete(&self, vet: &Vet) -> Result<(), RepositoryError> {
        let Some(id) = vet.id() else { return Ok(()) };
        self.write(|t| {
            t.remove_vet(id);
            Ok(())
        })?;
        tracing::debug!(vet_id = %id, "vet deleted");
        Ok(())
    }
}

impl UserRepository for InMemoryClinicStore {
    fn find_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        self.read(|t| t.user(username))?
            .ok_or(RepositoryError::EmptyResult("User"))
    }

    fn save(&self, user: &mut User) -> Result<(), RepositoryError> {
        self.save_with(user, Tables::write_user)?;
        tracing::debug!(username = user.username(), roles = user.roles().len(), "user saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn test_pet_type(store: &InMemoryClinicStore, name: &str) -> PetType {
        let mut pet_type = PetType::new(name);
        PetTypeRepository::save(store, &mut pet_type).unwrap();
        pet_type
    }

    fn test_owner_with_pet(store: &InMemoryClinicStore, pet_type: &PetType) -> Owner {
        let mut pet = Pet::new();
        pet.set_name(Some("Leo".to_string()));
        pet.set_pet_type(Some(pet_type.clone()));
        pet.add_visit(Visit::new(test_date(1), Some("rabies shot".to_string())));

        let mut owner = Owner::new();
        owner.set_first_name(Some("George".to_string()));
        owner.set_last_name(Some("Franklin".to_string()));
        owner.add_pet(pet);
        OwnerRepository::save(store, &mut owner).unwrap();
        owner
    }

    #[test]
    fn save_assigns_ids_through_the_whole_aggregate() {
        let store = InMemoryClinicStore::new();
        let cat = test_pet_type(&store, "cat");
        let owner = test_owner_with_pet(&store, &cat);

        let owner_id = owner.id().unwrap();
        let pet = &owner.pets()[0];
        assert_eq!(pet.owner_id(), Some(owner_id));
        assert!(pet.id().is_some());
        assert_eq!(pet.visits()[0].pet_id(), pet.id());
        assert!(pet.visits()[0].id().is_some());

        let loaded = OwnerRepository::find_by_id(&store, owner_id).unwrap();
        assert_eq!(loaded.pets().len(), 1);
        assert_eq!(loaded.pets()[0].pet_type().and_then(|t| t.name()), Some("cat"));
        assert_eq!(loaded.pets()[0].visits().len(), 1);
    }

    #[test]
    fn ids_are_sequential_per_table() {
        let store = InMemoryClinicStore::new();
        let cat = test_pet_type(&store, "cat");
        let dog = test_pet_type(&store, "dog");
        assert_eq!(cat.id(), Some(PetTypeId::new(1)));
        assert_eq!(dog.id(), Some(PetTypeId::new(2)));

        let mut explicit = PetType::with_id(PetTypeId::new(10), Some("lizard".to_string()));
        PetTypeRepository::save(&store, &mut explicit).unwrap();
        let next = test_pet_type(&store, "snake");
        assert_eq!(next.id(), Some(PetTypeId::new(11)));
    }

    #[test]
    fn missing_rows_use_the_retrieval_failure_shape() {
        let store = InMemoryClinicStore::new();
        match OwnerRepository::find_by_id(&store, OwnerId::new(99)) {
            Err(RepositoryError::ObjectRetrievalFailure { entity, id }) => {
                assert_eq!(entity, "Owner");
                assert_eq!(id, "99");
            }
            other => panic!("expected ObjectRetrievalFailure, got {other:?}"),
        }
        match store.find_by_username("nobody") {
            Err(e) => assert!(e.is_not_found()),
            Ok(user) => panic!("unexpected user {user:?}"),
        }
    }

    #[test]
    fn last_name_search_is_a_prefix_match() {
        let store = InMemoryClinicStore::new();
        for last_name in ["Davis", "Davidson", "Black"] {
            let mut owner = Owner::new();
            owner.set_last_name(Some(last_name.to_string()));
            OwnerRepository::save(&store, &mut owner).unwrap();
        }

        let found = store.find_by_last_name("Dav").unwrap();
        let names: Vec<_> = found.iter().filter_map(|o| o.last_name()).collect();
        assert_eq!(names, vec!["Davis", "Davidson"]);
        assert!(store.find_by_last_name("Zz").unwrap().is_empty());
    }

    #[test]
    fn unsaved_pet_type_is_rejected_and_nothing_is_written() {
        let store = InMemoryClinicStore::new();
        let mut pet = Pet::new();
        pet.set_pet_type(Some(PetType::new("hamster")));
        let mut owner = Owner::new();
        owner.add_pet(pet);

        match OwnerRepository::save(&store, &mut owner) {
            Err(RepositoryError::TransientReference { entity, referenced }) => {
                assert_eq!((entity, referenced), ("Pet", "PetType"));
            }
            other => panic!("expected TransientReference, got {other:?}"),
        }
        assert!(owner.is_new());
        assert!(OwnerRepository::find_all(&store).unwrap().is_empty());
    }

    #[test]
    fn visit_for_missing_pet_is_an_integrity_violation() {
        let store = InMemoryClinicStore::new();
        let mut visit = Visit::new(test_date(2), None);
        visit.attach_to_pet(PetId::new(42));

        match VisitRepository::save(&store, &mut visit) {
            Err(RepositoryError::IntegrityViolation(_)) => {}
            other => panic!("expected IntegrityViolation, got {other:?}"),
        }
    }

    #[test]
    fn deleting_owner_cascades_to_pets_and_visits() {
        let store = InMemoryClinicStore::new();
        let cat = test_pet_type(&store, "cat");
        let owner = test_owner_with_pet(&store, &cat);

        OwnerRepository::delete(&store, &owner).unwrap();
        assert!(PetRepository::find_all(&store).unwrap().is_empty());
        assert!(VisitRepository::find_all(&store).unwrap().is_empty());
        assert_eq!(PetTypeRepository::find_all(&store).unwrap().len(), 1);
    }

    #[test]
    fn deleting_pet_type_removes_dependent_pets() {
        let store = InMemoryClinicStore::new();
        let cat = test_pet_type(&store, "cat");
        let dog = test_pet_type(&store, "dog");
        let owner = test_owner_with_pet(&store, &cat);

        let mut rex = Pet::new();
        rex.set_name(Some("Rex".to_string()));
        rex.set_pet_type(Some(dog.clone()));
        rex.attach_to_owner(owner.id().unwrap());
        PetRepository::save(&store, &mut rex).unwrap();

        PetTypeRepository::delete(&store, &cat).unwrap();

        let pets = PetRepository::find_all(&store).unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name(), Some("Rex"));
        assert!(VisitRepository::find_all(&store).unwrap().is_empty());
        // The owner survives.
        assert!(OwnerRepository::find_by_id(&store, owner.id().unwrap()).is_ok());
    }

    #[test]
    fn deleting_specialty_unlinks_it_from_vets() {
        let store = InMemoryClinicStore::new();
        let mut radiology = Specialty::new("radiology");
        let mut surgery = Specialty::new("surgery");
        SpecialtyRepository::save(&store, &mut radiology).unwrap();
        SpecialtyRepository::save(&store, &mut surgery).unwrap();

        let mut vet = Vet::new();
        vet.add_specialty(radiology.clone());
        vet.add_specialty(surgery);
        VetRepository::save(&store, &mut vet).unwrap();

        SpecialtyRepository::delete(&store, &radiology).unwrap();

        let loaded = VetRepository::find_by_id(&store, vet.id().unwrap()).unwrap();
        let names: Vec<_> = loaded.specialties().iter().filter_map(|s| s.name()).collect();
        assert_eq!(names, vec!["surgery"]);
    }

    #[test]
    fn shared_lookup_renames_are_seen_by_every_pet() {
        let store = InMemoryClinicStore::new();
        let mut cat = test_pet_type(&store, "cat");
        let owner = test_owner_with_pet(&store, &cat);

        cat.set_name(Some("feline".to_string()));
        PetTypeRepository::save(&store, &mut cat).unwrap();

        let pet_id = owner.pets()[0].id().unwrap();
        let pet = PetRepository::find_by_id(&store, pet_id).unwrap();
        assert_eq!(pet.pet_type().and_then(|t| t.name()), Some("feline"));
    }

    #[test]
    fn pet_types_are_listed_by_name() {
        let store = InMemoryClinicStore::new();
        for name in ["snake", "bird", "cat"] {
            test_pet_type(&store, name);
        }
        let names: Vec<_> = store
            .find_pet_types()
            .unwrap()
            .iter()
            .filter_map(|t| t.name().map(str::to_owned))
            .collect();
        assert_eq!(names, vec!["bird", "cat", "snake"]);
    }

    #[test]
    fn user_roles_round_trip_with_back_references() {
        let store = InMemoryClinicStore::new();
        let mut user = User::new("admin");
        user.set_enabled(Some(true));
        user.add_role("ROLE_ADMIN");
        UserRepository::save(&store, &mut user).unwrap();
        assert!(user.roles()[0].id().is_some());

        let loaded = store.find_by_username("admin").unwrap();
        assert_eq!(loaded.enabled(), Some(true));
        assert_eq!(loaded.roles()[0].name(), Some("ROLE_ADMIN"));
        assert_eq!(loaded.roles()[0].username(), Some("admin"));
    }

    #[test]
    fn edited_pets_stay_with_their_owner() {
        let store = InMemoryClinicStore::new();
        let cat = test_pet_type(&store, "cat");
        let mut owner = test_owner_with_pet(&store, &cat);
        let mut other = Owner::new();
        other.set_last_name(Some("Davis".to_string()));
        OwnerRepository::save(&store, &mut other).unwrap();

        let pet_id = owner.pets()[0].id().unwrap();
        owner.edit_pet(pet_id, |pet| {
            pet.set_name(Some("Leonard".to_string()));
            pet.attach_to_owner(other.id().unwrap());
        });
        OwnerRepository::save(&store, &mut owner).unwrap();

        let loaded = OwnerRepository::find_by_id(&store, owner.id().unwrap()).unwrap();
        assert_eq!(loaded.pets()[0].name(), Some("Leonard"));
        let other = OwnerRepository::find_by_id(&store, other.id().unwrap()).unwrap();
        assert!(other.pets().is_empty());
    }

    #[test]
    fn exhausted_sequence_fails_without_poisoning_the_store() {
        let store = InMemoryClinicStore::new();
        let mut last = PetType::with_id(PetTypeId::new(u32::MAX), Some("hamster".to_string()));
        PetTypeRepository::save(&store, &mut last).unwrap();

        let mut next = PetType::new("dog");
        match PetTypeRepository::save(&store, &mut next) {
            Err(RepositoryError::IntegrityViolation(msg)) => assert!(msg.contains("pet_types")),
            other => panic!("Expected IntegrityViolation, got {other:?}"),
        }
        assert!(next.is_new());

        let all = PetTypeRepository::find_all(&store).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), Some(PetTypeId::new(u32::MAX)));
    }

    #[test]
    fn deleting_transient_entity_is_a_noop() {
        let store = InMemoryClinicStore::new();
        VetRepository::delete(&store, &Vet::new()).unwrap();
        assert!(VetRepository::find_all(&store).unwrap().is_empty());
    }
}
