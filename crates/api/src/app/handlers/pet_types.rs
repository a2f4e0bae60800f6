use petclinic_core::{Entity, PetTypeId};
use petclinic_owners::PetType;

use super::{HandlerResult, Reply, check_body_id, create_body_id, location, non_empty, validate};
use crate::app::dto::{PetTypeDto, PetTypeFieldsDto};
use crate::app::errors::ApiError;
use crate::app::mapper::pet_type;
use crate::app::services::ClinicService;

pub fn list_pet_types(service: &ClinicService) -> HandlerResult<Vec<PetTypeDto>> {
    let types = non_empty(service.find_all_pet_types()?)?;
    Ok(Reply::ok(pet_type::to_dtos(&types)))
}

pub fn get_pet_type(service: &ClinicService, pet_type_id: PetTypeId) -> HandlerResult<PetTypeDto> {
    let pet_type = load(service, pet_type_id)?;
    Ok(Reply::ok(pet_type::to_dto(&pet_type)))
}

pub fn add_pet_type(service: &ClinicService, dto: PetTypeDto) -> HandlerResult<PetTypeDto> {
    check_body_id("petTypeDto", None, create_body_id(dto.id))?;
    validate(&dto)?;
    let mut pet_type = pet_type::to_entity(dto);
    service.save_pet_type(&mut pet_type)?;
    Ok(Reply::created(pet_type::to_dto(&pet_type), location("pettypes", pet_type.id())))
}

pub fn update_pet_type(
    service: &ClinicService,
    pet_type_id: PetTypeId,
    fields: PetTypeFieldsDto,
) -> HandlerResult<PetTypeDto> {
    validate(&fields)?;
    let mut pet_type = load(service, pet_type_id)?;
    pet_type::apply_fields(&mut pet_type, fields);
    service.save_pet_type(&mut pet_type)?;
    Ok(Reply::no_content(Some(pet_type::to_dto(&pet_type))))
}

/// Deletes the type together with every pet of that type.
pub fn delete_pet_type(service: &ClinicService, pet_type_id: PetTypeId) -> HandlerResult<PetTypeDto> {
    let pet_type = load(service, pet_type_id)?;
    service.delete_pet_type(&pet_type)?;
    Ok(Reply::no_content(None))
}

fn load(service: &ClinicService, pet_type_id: PetTypeId) -> Result<PetType, ApiError> {
    service.find_pet_type_by_id(pet_type_id)?.ok_or(ApiError::NotFound)
}
