use petclinic_core::{Entity, PetTypeId};
use petclinic_owners::PetType;

use super::{assigned, text};
use crate::app::dto::{PetTypeDto, PetTypeFieldsDto};

pub fn to_dto(pet_type: &PetType) -> PetTypeDto {
    PetTypeDto {
        id: pet_type.id().map_or(0, PetTypeId::get),
        name: text(pet_type.name()),
    }
}

pub fn to_nullable_dto(pet_type: Option<&PetType>) -> Option<PetTypeDto> {
    pet_type.map(to_dto)
}

/// Reference to a pet type as named in the DTO (id preserved).
pub fn to_entity(dto: PetTypeDto) -> PetType {
    let mut pet_type = PetType::new(dto.name);
    if let Some(id) = assigned(dto.id, PetTypeId::new) {
        pet_type.assign_id(id);
    }
    pet_type
}

pub fn from_fields(dto: PetTypeFieldsDto) -> PetType {
    PetType::new(dto.name)
}

pub fn apply_fields(pet_type: &mut PetType, dto: PetTypeFieldsDto) {
    pet_type.set_name(Some(dto.name));
}

pub fn to_dtos<'a>(pet_types: impl IntoIterator<Item = &'a PetType>) -> Vec<PetTypeDto> {
    pet_types.into_iter().map(to_dto).collect()
}

pub fn to_entities(dtos: Vec<PetTypeDto>) -> Vec<PetType> {
    dtos.into_iter().map(to_entity).collect()
}
