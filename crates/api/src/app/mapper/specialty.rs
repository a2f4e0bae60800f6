use petclinic_core::{Entity, SpecialtyId};
use petclinic_vets::Specialty;

use super::{assigned, text};
use crate::app::dto::SpecialtyDto;

pub fn to_dto(specialty: &Specialty) -> SpecialtyDto {
    SpecialtyDto {
        id: specialty.id().map_or(0, SpecialtyId::get),
        name: text(specialty.name()),
    }
}

pub fn to_nullable_dto(specialty: Option<&Specialty>) -> Option<SpecialtyDto> {
    specialty.map(to_dto)
}

pub fn to_entity(dto: SpecialtyDto) -> Specialty {
    let mut specialty = Specialty::new(dto.name);
    if let Some(id) = assigned(dto.id, SpecialtyId::new) {
        specialty.assign_id(id);
    }
    specialty
}

pub fn to_dtos<'a>(specialties: impl IntoIterator<Item = &'a Specialty>) -> Vec<SpecialtyDto> {
    specialties.into_iter().map(to_dto).collect()
}

pub fn to_entities(dtos: Vec<SpecialtyDto>) -> Vec<Specialty> {
    dtos.into_iter().map(to_entity).collect()
}
