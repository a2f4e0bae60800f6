use petclinic_core::{Entity, VetId};
use petclinic_vets::Vet;

use super::{HandlerResult, Reply, check_body_id, create_body_id, location, non_empty, validate};
use crate::app::dto::{VetDto, VetFieldsDto};
use crate::app::errors::ApiError;
use crate::app::mapper::vet;
use crate::app::services::ClinicService;

pub fn list_vets(service: &ClinicService) -> HandlerResult<Vec<VetDto>> {
    let vets = non_empty(service.find_all_vets()?)?;
    Ok(Reply::ok(vet::to_dtos(&vets)))
}

pub fn get_vet(service: &ClinicService, vet_id: VetId) -> HandlerResult<VetDto> {
    let vet = load(service, vet_id)?;
    Ok(Reply::ok(vet::to_dto(&vet)))
}

pub fn add_vet(service: &ClinicService, dto: VetDto) -> HandlerResult<VetDto> {
    check_body_id("vetDto", None, create_body_id(dto.id))?;
    validate(&dto)?;
    let mut vet = vet::to_entity(dto);
    service.save_vet(&mut vet)?;
    Ok(Reply::created(vet::to_dto(&vet), location("vets", vet.id())))
}

/// Replace names and the complete specialty set.
pub fn update_vet(service: &ClinicService, vet_id: VetId, fields: VetFieldsDto) -> HandlerResult<VetDto> {
    validate(&fields)?;
    let mut vet = load(service, vet_id)?;
    vet::apply_fields(&mut vet, fields);
    service.save_vet(&mut vet)?;
    Ok(Reply::no_content(Some(vet::to_dto(&vet))))
}

pub fn delete_vet(service: &ClinicService, vet_id: VetId) -> HandlerResult<VetDto> {
    let vet = load(service, vet_id)?;
    service.delete_vet(&vet)?;
    Ok(Reply::no_content(None))
}

fn load(service: &ClinicService, vet_id: VetId) -> Result<Vet, ApiError> {
    service.find_vet_by_id(vet_id)?.ok_or(ApiError::NotFound)
}
