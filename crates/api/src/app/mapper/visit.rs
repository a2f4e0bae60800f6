use petclinic_core::{Entity, PetId, VisitId};
use petclinic_owners::Visit;

use super::{assigned, text, today};
use crate::app::dto::{VisitDto, VisitFieldsDto};

pub fn to_dto(visit: &Visit) -> VisitDto {
    VisitDto {
        description: text(visit.description()),
        id: visit.id().map_or(0, VisitId::get),
        date: Some(visit.date()),
        pet_id: visit.pet_id().map(PetId::get),
    }
}

pub fn to_nullable_dto(visit: Option<&Visit>) -> Option<VisitDto> {
    visit.map(to_dto)
}

/// Missing date defaults to today; `petId`, when present, attaches the visit.
pub fn to_entity(dto: VisitDto) -> Visit {
    let mut visit = Visit::new(dto.date.unwrap_or_else(today), Some(dto.description));
    if let Some(id) = assigned(dto.id, VisitId::new) {
        visit.assign_id(id);
    }
    if let Some(pet_id) = dto.pet_id {
        visit.attach_to_pet(PetId::new(pet_id));
    }
    visit
}

pub fn from_fields(dto: VisitFieldsDto) -> Visit {
    Visit::new(dto.date.unwrap_or_else(today), Some(dto.description))
}

pub fn apply_fields(visit: &mut Visit, dto: VisitFieldsDto) {
    visit.set_date(dto.date.unwrap_or_else(today));
    visit.set_description(Some(dto.description));
}

pub fn to_dtos<'a>(visits: impl IntoIterator<Item = &'a Visit>) -> Vec<VisitDto> {
    visits.into_iter().map(to_dto).collect()
}

pub fn to_entities(dtos: Vec<VisitDto>) -> Vec<Visit> {
    dtos.into_iter().map(to_entity).collect()
}
