use petclinic_core::{Entity, OwnerId, PetId};
use petclinic_owners::{Owner, Pet};

use super::{HandlerResult, Reply, location, non_empty, validate};
use crate::app::dto::{BindingTarget, OwnerDto, OwnerFieldsDto, PetDto, PetFieldsDto, VisitDto, VisitFieldsDto};
use crate::app::errors::{ApiError, BindingErrorsResponse};
use crate::app::mapper::{owner, pet, visit};
use crate::app::services::ClinicService;
use crate::app::validation::FieldError;

/// All owners, or those whose last name starts with `last_name`.
pub fn list_owners(service: &ClinicService, last_name: Option<&str>) -> HandlerResult<Vec<OwnerDto>> {
    let owners = match last_name {
        Some(last_name) => service.find_owner_by_last_name(last_name)?,
        None => service.find_all_owners()?,
    };
    Ok(Reply::ok(owner::to_dtos(&non_empty(owners)?)))
}

pub fn get_owner(service: &ClinicService, owner_id: OwnerId) -> HandlerResult<OwnerDto> {
    let owner = load(service, owner_id)?;
    Ok(Reply::ok(owner::to_dto(&owner)))
}

pub fn add_owner(service: &ClinicService, fields: OwnerFieldsDto) -> HandlerResult<OwnerDto> {
    validate(&fields)?;
    let mut owner = owner::from_fields(fields);
    service.save_owner(&mut owner)?;
    Ok(Reply::created(owner::to_dto(&owner), location("owners", owner.id())))
}

pub fn update_owner(
    service: &ClinicService,
    owner_id: OwnerId,
    fields: OwnerFieldsDto,
) -> HandlerResult<OwnerDto> {
    validate(&fields)?;
    let mut owner = load(service, owner_id)?;
    owner::apply_fields(&mut owner, fields);
    service.save_owner(&mut owner)?;
    Ok(Reply::no_content(Some(owner::to_dto(&owner))))
}

/// Deletes the owner with its pets and their visits.
pub fn delete_owner(service: &ClinicService, owner_id: OwnerId) -> HandlerResult<OwnerDto> {
    let owner = load(service, owner_id)?;
    service.delete_owner(&owner)?;
    Ok(Reply::no_content(None))
}

/// Register a new pet for an owner. Pet names are unique per owner
/// (case-insensitive).
pub fn add_pet_to_owner(
    service: &ClinicService,
    owner_id: OwnerId,
    fields: PetFieldsDto,
) -> HandlerResult<PetDto> {
    validate(&fields)?;
    let owner = load(service, owner_id)?;
    if owner.pet_by_name(&fields.name, true).is_some() {
        let mut errors = BindingErrorsResponse::default();
        errors.add_all_errors([FieldError {
            object_name: PetFieldsDto::OBJECT_NAME.to_string(),
            field: "name".to_string(),
            rejected_value: Some(fields.name),
            message: "already exists".to_string(),
        }]);
        tracing::warn!(%owner_id, "duplicate pet name");
        return Err(ApiError::Validation(errors));
    }

    let mut pet = pet::from_fields(fields);
    pet.attach_to_owner(owner_id);
    service.save_pet(&mut pet)?;
    let saved = reload_pet(service, pet.id())?;
    Ok(Reply::created(pet::to_dto(&saved), location("pets", saved.id())))
}

/// Book a visit for one of the owner's pets.
pub fn add_visit_to_owner(
    service: &ClinicService,
    owner_id: OwnerId,
    pet_id: PetId,
    fields: VisitFieldsDto,
) -> HandlerResult<VisitDto> {
    validate(&fields)?;
    let owner = load(service, owner_id)?;
    if owner.pet(pet_id).is_none() {
        return Err(ApiError::NotFound);
    }

    let mut visit = visit::from_fields(fields);
    visit.attach_to_pet(pet_id);
    service.save_visit(&mut visit)?;
    tracing::debug!(%owner_id, %pet_id, "visit booked");
    Ok(Reply::created(visit::to_dto(&visit), location("visits", visit.id())))
}

fn load(service: &ClinicService, owner_id: OwnerId) -> Result<Owner, ApiError> {
    service.find_owner_by_id(owner_id)?.ok_or(ApiError::NotFound)
}

fn reload_pet(service: &ClinicService, pet_id: Option<PetId>) -> Result<Pet, ApiError> {
    let pet_id = pet_id.ok_or(ApiError::NotFound)?;
    service.find_pet_by_id(pet_id)?.ok_or(ApiError::NotFound)
}
