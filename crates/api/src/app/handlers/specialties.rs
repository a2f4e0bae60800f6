use petclinic_core::{Entity, SpecialtyId};
use petclinic_vets::Specialty;

use super::{HandlerResult, Reply, check_body_id, create_body_id, location, non_empty, validate};
use crate::app::dto::SpecialtyDto;
use crate::app::errors::ApiError;
use crate::app::mapper::specialty;
use crate::app::services::ClinicService;

pub fn list_specialties(service: &ClinicService) -> HandlerResult<Vec<SpecialtyDto>> {
    let specialties = non_empty(service.find_all_specialties()?)?;
    Ok(Reply::ok(specialty::to_dtos(&specialties)))
}

pub fn get_specialty(service: &ClinicService, specialty_id: SpecialtyId) -> HandlerResult<SpecialtyDto> {
    let specialty = load(service, specialty_id)?;
    Ok(Reply::ok(specialty::to_dto(&specialty)))
}

pub fn add_specialty(service: &ClinicService, dto: SpecialtyDto) -> HandlerResult<SpecialtyDto> {
    check_body_id("specialtyDto", None, create_body_id(dto.id))?;
    validate(&dto)?;
    let mut specialty = specialty::to_entity(dto);
    service.save_specialty(&mut specialty)?;
    Ok(Reply::created(specialty::to_dto(&specialty), location("specialties", specialty.id())))
}

/// Rename a specialty. The body id must match the path id.
pub fn update_specialty(
    service: &ClinicService,
    specialty_id: SpecialtyId,
    dto: SpecialtyDto,
) -> HandlerResult<SpecialtyDto> {
    check_body_id("specialtyDto", Some(specialty_id.get()), Some(dto.id))?;
    validate(&dto)?;

    let mut specialty = load(service, specialty_id)?;
    specialty.set_name(Some(dto.name));
    service.save_specialty(&mut specialty)?;
    Ok(Reply::no_content(Some(specialty::to_dto(&specialty))))
}

/// Deletes the specialty and unlinks it from every vet.
pub fn delete_specialty(service: &ClinicService, specialty_id: SpecialtyId) -> HandlerResult<SpecialtyDto> {
    let specialty = load(service, specialty_id)?;
    service.delete_specialty(&specialty)?;
    Ok(Reply::no_content(None))
}

fn load(service: &ClinicService, specialty_id: SpecialtyId) -> Result<Specialty, ApiError> {
    service.find_specialty_by_id(specialty_id)?.ok_or(ApiError::NotFound)
}
