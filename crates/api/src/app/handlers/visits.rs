use petclinic_core::{Entity, VisitId};
use petclinic_owners::Visit;

use super::{HandlerResult, Reply, check_body_id, create_body_id, location, non_empty, validate};
use crate::app::dto::{VisitDto, VisitFieldsDto};
use crate::app::errors::ApiError;
use crate::app::mapper::visit;
use crate::app::services::ClinicService;

pub fn list_visits(service: &ClinicService) -> HandlerResult<Vec<VisitDto>> {
    let visits = non_empty(service.find_all_visits()?)?;
    Ok(Reply::ok(visit::to_dtos(&visits)))
}

pub fn get_visit(service: &ClinicService, visit_id: VisitId) -> HandlerResult<VisitDto> {
    let visit = load(service, visit_id)?;
    Ok(Reply::ok(visit::to_dto(&visit)))
}

pub fn add_visit(service: &ClinicService, dto: VisitDto) -> HandlerResult<VisitDto> {
    check_body_id("visitDto", None, create_body_id(dto.id))?;
    validate(&dto)?;
    let mut visit = visit::to_entity(dto);
    service.save_visit(&mut visit)?;
    Ok(Reply::created(visit::to_dto(&visit), location("visits", visit.id())))
}

pub fn update_visit(
    service: &ClinicService,
    visit_id: VisitId,
    fields: VisitFieldsDto,
) -> HandlerResult<VisitDto> {
    validate(&fields)?;
    let mut visit = load(service, visit_id)?;
    visit::apply_fields(&mut visit, fields);
    service.save_visit(&mut visit)?;
    Ok(Reply::no_content(Some(visit::to_dto(&visit))))
}

pub fn delete_visit(service: &ClinicService, visit_id: VisitId) -> HandlerResult<VisitDto> {
    let visit = load(service, visit_id)?;
    service.delete_visit(&visit)?;
    Ok(Reply::no_content(None))
}

fn load(service: &ClinicService, visit_id: VisitId) -> Result<Visit, ApiError> {
    service.find_visit_by_id(visit_id)?.ok_or(ApiError::NotFound)
}
