use petclinic_core::PetId;
use petclinic_owners::Pet;

use super::{HandlerResult, Reply, non_empty, validate};
use crate::app::dto::{PetDto, PetFieldsDto, PetTypeDto};
use crate::app::errors::ApiError;
use crate::app::mapper::{pet, pet_type};
use crate::app::services::ClinicService;

pub fn list_pets(service: &ClinicService) -> HandlerResult<Vec<PetDto>> {
    let pets = non_empty(service.find_all_pets()?)?;
    Ok(Reply::ok(pet::to_dtos(&pets)))
}

pub fn get_pet(service: &ClinicService, pet_id: PetId) -> HandlerResult<PetDto> {
    let pet = load(service, pet_id)?;
    Ok(Reply::ok(pet::to_dto(&pet)))
}

/// Pet types to choose from when registering a pet, ordered by name.
pub fn list_pet_types_for_pets(service: &ClinicService) -> HandlerResult<Vec<PetTypeDto>> {
    let types = non_empty(service.find_pet_types()?)?;
    Ok(Reply::ok(pet_type::to_dtos(&types)))
}

pub fn update_pet(service: &ClinicService, pet_id: PetId, fields: PetFieldsDto) -> HandlerResult<PetDto> {
    validate(&fields)?;
    let mut pet = load(service, pet_id)?;
    pet::apply_fields(&mut pet, fields);
    service.save_pet(&mut pet)?;
    // The store links the type by id, so report the stored type name.
    let saved = load(service, pet_id)?;
    Ok(Reply::no_content(Some(pet::to_dto(&saved))))
}

/// Deletes the pet with its visits.
pub fn delete_pet(service: &ClinicService, pet_id: PetId) -> HandlerResult<PetDto> {
    let pet = load(service, pet_id)?;
    service.delete_pet(&pet)?;
    Ok(Reply::no_content(None))
}

fn load(service: &ClinicService, pet_id: PetId) -> Result<Pet, ApiError> {
    service.find_pet_by_id(pet_id)?.ok_or(ApiError::NotFound)
}
