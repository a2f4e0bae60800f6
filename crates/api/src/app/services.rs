//! Use-case facade over the repositories.
//!
//! Lookups by id translate both not-found shapes of the repositories into
//! `Ok(None)`; every other repository failure is propagated. Every repository
//! call goes through the injected [`CallMonitor`].

use std::sync::Arc;

use thiserror::Error;

use petclinic_auth::{User, with_role_prefix};
use petclinic_core::{DomainError, OwnerId, PetId, PetTypeId, SpecialtyId, VetId, VisitId};
use petclinic_infra::{
    InMemoryClinicStore, OwnerRepository, PetRepository, PetTypeRepository, RepositoryError,
    SpecialtyRepository, UserRepository, VetRepository, VisitRepository,
};
use petclinic_observability::{CallMonitor, MonitorConfig};
use petclinic_owners::{Owner, Pet, PetType, Visit};
use petclinic_vets::{Specialty, Vet};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

fn found<T>(result: Result<T, RepositoryError>) -> ServiceResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Repository set backing a [`ClinicService`].
#[derive(Clone)]
pub struct Repositories {
    pub owners: Arc<dyn OwnerRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub visits: Arc<dyn VisitRepository>,
    pub pet_types: Arc<dyn PetTypeRepository>,
    pub specialties: Arc<dyn SpecialtyRepository>,
    pub vets: Arc<dyn VetRepository>,
}

impl Repositories {
    /// Every repository served by the same in-memory store.
    pub fn in_memory(store: Arc<InMemoryClinicStore>) -> Self {
        Self {
            owners: store.clone(),
            pets: store.clone(),
            visits: store.clone(),
            pet_types: store.clone(),
            specialties: store.clone(),
            vets: store,
        }
    }
}

#[derive(Clone)]
pub struct ClinicService {
    repos: Repositories,
    monitor: Arc<CallMonitor>,
}

impl ClinicService {
    pub fn new(repos: Repositories, monitor: Arc<CallMonitor>) -> Self {
        Self { repos, monitor }
    }

    pub fn monitor(&self) -> &CallMonitor {
        &self.monitor
    }

    // ─────────────────────────────────────────────────────────────────────
    // Owners
    // ─────────────────────────────────────────────────────────────────────

    pub fn find_owner_by_id(&self, id: OwnerId) -> ServiceResult<Option<Owner>> {
        found(self.monitor.invoke("findOwnerById", || self.repos.owners.find_by_id(id)))
    }

    pub fn find_all_owners(&self) -> ServiceResult<Vec<Owner>> {
        Ok(self.monitor.invoke("findAllOwners", || self.repos.owners.find_all())?)
    }

    /// Owners whose last name starts with `last_name`.
    pub fn find_owner_by_last_name(&self, last_name: &str) -> ServiceResult<Vec<Owner>> {
        Ok(self
            .monitor
            .invoke("findOwnerByLastName", || self.repos.owners.find_by_last_name(last_name))?)
    }

    pub fn save_owner(&self, owner: &mut Owner) -> ServiceResult<()> {
        Ok(self.monitor.invoke("saveOwner", || self.repos.owners.save(owner))?)
    }

    pub fn delete_owner(&self, owner: &Owner) -> ServiceResult<()> {
        Ok(self.monitor.invoke("deleteOwner", || self.repos.owners.delete(owner))?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pets
    // ─────────────────────────────────────────────────────────────────────

    pub fn find_pet_by_id(&self, id: PetId) -> ServiceResult<Option<Pet>> {
        found(self.monitor.invoke("findPetById", || self.repos.pets.find_by_id(id)))
    }

    pub fn find_all_pets(&self) -> ServiceResult<Vec<Pet>> {
        Ok(self.monitor.invoke("findAllPets", || self.repos.pets.find_all())?)
    }

    /// Pet types ordered by name, as offered when registering a pet.
    pub fn find_pet_types(&self) -> ServiceResult<Vec<PetType>> {
        Ok(self.monitor.invoke("findPetTypes", || self.repos.pets.find_pet_types())?)
    }

    pub fn save_pet(&self, pet: &mut Pet) -> ServiceResult<()> {
        Ok(self.monitor.invoke("savePet", || self.repos.pets.save(pet))?)
    }

    pub fn delete_pet(&self, pet: &Pet) -> ServiceResult<()> {
        Ok(self.monitor.invoke("deletePet", || self.repos.pets.delete(pet))?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Visits
    // ─────────────────────────────────────────────────────────────────────

    pub fn find_visit_by_id(&self, id: VisitId) -> ServiceResult<Option<Visit>> {
        found(self.monitor.invoke("findVisitById", || self.repos.visits.find_by_id(id)))
    }

    pub fn find_all_visits(&self) -> ServiceResult<Vec<Visit>> {
        Ok(self.monitor.invoke("findAllVisits", || self.repos.visits.find_all())?)
    }

    pub fn find_visits_by_pet_id(&self, pet_id: PetId) -> ServiceResult<Vec<Visit>> {
        Ok(self
            .monitor
            .invoke("findVisitsByPetId", || self.repos.visits.find_by_pet_id(pet_id))?)
    }

    pub fn save_visit(&self, visit: &mut Visit) -> ServiceResult<()> {
        Ok(self.monitor.invoke("saveVisit", || self.repos.visits.save(visit))?)
    }

    pub fn delete_visit(&self, visit: &Visit) -> ServiceResult<()> {
        Ok(self.monitor.invoke("deleteVisit", || self.repos.visits.delete(visit))?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pet types
    // ─────────────────────────────────────────────────────────────────────

    pub fn find_pet_type_by_id(&self, id: PetTypeId) -> ServiceResult<Option<PetType>> {
        found(self.monitor.invoke("findPetTypeById", || self.repos.pet_types.find_by_id(id)))
    }

    pub fn find_all_pet_types(&self) -> ServiceResult<Vec<PetType>> {
        Ok(self.monitor.invoke("findAllPetTypes", || self.repos.pet_types.find_all())?)
    }

    pub fn save_pet_type(&self, pet_type: &mut PetType) -> ServiceResult<()> {
        Ok(self.monitor.invoke("savePetType", || self.repos.pet_types.save(pet_type))?)
    }

    /// Also removes every pet of this type and their visits.
    pub fn delete_pet_type(&self, pet_type: &PetType) -> ServiceResult<()> {
        Ok(self.monitor.invoke("deletePetType", || self.repos.pet_types.delete(pet_type))?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Specialties
    // ─────────────────────────────────────────────────────────────────────

    pub fn find_specialty_by_id(&self, id: SpecialtyId) -> ServiceResult<Option<Specialty>> {
        found(self.monitor.invoke("findSpecialtyById", || self.repos.specialties.find_by_id(id)))
    }

    pub fn find_all_specialties(&self) -> ServiceResult<Vec<Specialty>> {
        Ok(self.monitor.invoke("findAllSpecialties", || self.repos.specialties.find_all())?)
    }

    pub fn save_specialty(&self, specialty: &mut Specialty) -> ServiceResult<()> {
        Ok(self.monitor.invoke("saveSpecialty", || self.repos.specialties.save(specialty))?)
    }

    pub fn delete_specialty(&self, specialty: &Specialty) -> ServiceResult<()> {
        Ok(self.monitor.invoke("deleteSpecialty", || self.repos.specialties.delete(specialty))?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Vets
    // ─────────────────────────────────────────────────────────────────────

    pub fn find_vet_by_id(&self, id: VetId) -> ServiceResult<Option<Vet>> {
        found(self.monitor.invoke("findVetById", || self.repos.vets.find_by_id(id)))
    }

    pub fn find_all_vets(&self) -> ServiceResult<Vec<Vet>> {
        Ok(self.monitor.invoke("findAllVets", || self.repos.vets.find_all())?)
    }

    pub fn save_vet(&self, vet: &mut Vet) -> ServiceResult<()> {
        Ok(self.monitor.invoke("saveVet", || self.repos.vets.save(vet))?)
    }

    pub fn delete_vet(&self, vet: &Vet) -> ServiceResult<()> {
        Ok(self.monitor.invoke("deleteVet", || self.repos.vets.delete(vet))?)
    }
}

/// User account use cases.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    monitor: Arc<CallMonitor>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, monitor: Arc<CallMonitor>) -> Self {
        Self { users, monitor }
    }

    /// Save a user after enforcing the role rules.
    ///
    /// A user without roles is rejected before the repository is touched.
    /// Role names get the `ROLE_` prefix when missing, and unattached roles
    /// are attached to the user.
    pub fn save_user(&self, user: &mut User) -> ServiceResult<()> {
        if user.roles().is_empty() {
            return Err(DomainError::validation("User must have at least a role set!").into());
        }

        let username = user.username().to_owned();
        for role in user.roles_mut() {
            let prefixed = with_role_prefix(role.name().unwrap_or_default()).into_owned();
            role.set_name(Some(prefixed));
            if role.username().is_none() {
                role.attach_to_user(username.as_str());
            }
        }

        Ok(self.monitor.invoke("saveUser", || self.users.save(user))?)
    }
}

/// Both services over one in-memory store, monitored per `MonitorConfig::from_env()`.
pub fn in_memory_services() -> (ClinicService, UserService) {
    let store = Arc::new(InMemoryClinicStore::new());
    let monitor = Arc::new(CallMonitor::new(MonitorConfig::from_env()));
    (
        ClinicService::new(Repositories::in_memory(store.clone()), monitor.clone()),
        UserService::new(store, monitor),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every user handed to it.
    #[derive(Default)]
    struct RecordingUsers {
        saved: Mutex<Vec<User>>,
    }

    impl UserRepository for RecordingUsers {
        fn find_by_username(&self, _username: &str) -> Result<User, RepositoryError> {
            Err(RepositoryError::EmptyResult("User"))
        }

        fn save(&self, user: &mut User) -> Result<(), RepositoryError> {
            self.saved.lock().unwrap().push(user.clone());
            Ok(())
        }
    }

    fn test_user_service() -> (UserService, Arc<RecordingUsers>) {
        let users = Arc::new(RecordingUsers::default());
        let service = UserService::new(users.clone(), Arc::new(CallMonitor::default()));
        (service, users)
    }

    fn test_clinic_service() -> ClinicService {
        let store = Arc::new(InMemoryClinicStore::new());
        ClinicService::new(Repositories::in_memory(store), Arc::new(CallMonitor::default()))
    }

    #[test]
    fn user_without_roles_fails_before_persistence() {
        let (service, users) = test_user_service();
        let mut user = User::new("nobody");

        match service.save_user(&mut user) {
            Err(ServiceError::Domain(DomainError::Validation(msg))) => {
                assert!(msg.contains("at least a role"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
        assert!(users.saved.lock().unwrap().is_empty());
        assert_eq!(service.monitor.call_count(), 0);
    }

    #[test]
    fn role_names_get_prefixed_once() {
        let (service, users) = test_user_service();
        let mut user = User::new("admin");
        user.add_role("ADMIN");
        user.add_role("ROLE_VET_ADMIN");

        service.save_user(&mut user).unwrap();

        let saved = users.saved.lock().unwrap();
        let names: Vec<_> = saved[0].roles().iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, vec!["ROLE_ADMIN", "ROLE_VET_ADMIN"]);
        assert!(saved[0].roles().iter().all(|r| r.username() == Some("admin")));
    }

    #[test]
    fn existing_back_reference_is_kept() {
        let (service, users) = test_user_service();
        let mut user = User::new("admin");
        user.add_role("ROLE_ADMIN");
        user.roles_mut()[0].attach_to_user("someone.else");

        service.save_user(&mut user).unwrap();
        assert_eq!(users.saved.lock().unwrap()[0].roles()[0].username(), Some("someone.else"));
    }

    #[test]
    fn missing_rows_are_absent_not_errors() {
        let service = test_clinic_service();
        assert!(service.find_owner_by_id(OwnerId::new(1)).unwrap().is_none());
        assert!(service.find_pet_type_by_id(PetTypeId::new(1)).unwrap().is_none());
        assert!(service.find_vet_by_id(VetId::new(1)).unwrap().is_none());
        assert!(service.find_visit_by_id(VisitId::new(1)).unwrap().is_none());
    }

    #[test]
    fn save_assigns_id_and_calls_are_monitored() {
        let service = test_clinic_service();
        let mut specialty = Specialty::new("radiology");
        service.save_specialty(&mut specialty).unwrap();

        let id = petclinic_core::Entity::id(&specialty).unwrap();
        let loaded = service.find_specialty_by_id(id).unwrap().unwrap();
        assert_eq!(loaded.name(), Some("radiology"));
        assert_eq!(service.monitor().call_count(), 2);
    }

    #[test]
    fn other_repository_failures_propagate() {
        struct DownOwners;

        impl OwnerRepository for DownOwners {
            fn find_by_id(&self, _id: OwnerId) -> Result<Owner, RepositoryError> {
                Err(RepositoryError::Unavailable("lock poisoned".to_string()))
            }
            fn find_by_last_name(&self, _last_name: &str) -> Result<Vec<Owner>, RepositoryError> {
                Ok(vec![])
            }
            fn find_all(&self) -> Result<Vec<Owner>, RepositoryError> {
                Ok(vec![])
            }
            fn save(&self, _owner: &mut Owner) -> Result<(), RepositoryError> {
                Ok(())
            }
            fn delete(&self, _owner: &Owner) -> Result<(), RepositoryError> {
                Ok(())
            }
        }

        let mut repos = Repositories::in_memory(Arc::new(InMemoryClinicStore::new()));
        repos.owners = Arc::new(DownOwners);
        let service = ClinicService::new(repos, Arc::new(CallMonitor::default()));

        match service.find_owner_by_id(OwnerId::new(1)) {
            Err(ServiceError::Repository(RepositoryError::Unavailable(_))) => {}
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }
}
