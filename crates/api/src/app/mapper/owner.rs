use petclinic_core::{Entity, OwnerId};
use petclinic_owners::Owner;

use super::{assigned, pet, text};
use crate::app::dto::{OwnerDto, OwnerFieldsDto};

pub fn to_dto(owner: &Owner) -> OwnerDto {
    OwnerDto {
        first_name: text(owner.first_name()),
        last_name: text(owner.last_name()),
        address: text(owner.address()),
        city: text(owner.city()),
        telephone: text(owner.telephone()),
        pets: pet::to_dtos(owner.pets()),
        id: owner.id().map(OwnerId::get),
    }
}

pub fn to_nullable_dto(owner: Option<&Owner>) -> Option<OwnerDto> {
    owner.map(to_dto)
}

pub fn to_entity(dto: OwnerDto) -> Owner {
    let mut owner = Owner::new();
    if let Some(id) = dto.id.and_then(|id| assigned(id, OwnerId::new)) {
        owner.assign_id(id);
    }
    owner.set_first_name(Some(dto.first_name));
    owner.set_last_name(Some(dto.last_name));
    owner.set_address(Some(dto.address));
    owner.set_city(Some(dto.city));
    owner.set_telephone(Some(dto.telephone));
    owner.set_pets(pet::to_entities(dto.pets));
    owner
}

pub fn from_fields(dto: OwnerFieldsDto) -> Owner {
    let mut owner = Owner::new();
    apply_fields(&mut owner, dto);
    owner
}

pub fn apply_fields(owner: &mut Owner, dto: OwnerFieldsDto) {
    owner.set_address(Some(dto.address));
    owner.set_city(Some(dto.city));
    owner.set_first_name(Some(dto.first_name));
    owner.set_last_name(Some(dto.last_name));
    owner.set_telephone(Some(dto.telephone));
}

pub fn to_dtos<'a>(owners: impl IntoIterator<Item = &'a Owner>) -> Vec<OwnerDto> {
    owners.into_iter().map(to_dto).collect()
}

pub fn to_entities(dtos: Vec<OwnerDto>) -> Vec<Owner> {
    dtos.into_iter().map(to_entity).collect()
}
