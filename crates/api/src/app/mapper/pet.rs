use petclinic_core::{Entity, OwnerId, PetId};
use petclinic_owners::Pet;

use super::{assigned, pet_type, text, today, visit};
use crate::app::dto::{PetDto, PetFieldsDto};

/// Visits are emitted newest first; the owner is emitted as `ownerId`.
pub fn to_dto(pet: &Pet) -> PetDto {
    PetDto {
        name: text(pet.name()),
        birth_date: pet.birth_date().unwrap_or_else(today),
        pet_type: pet_type::to_nullable_dto(pet.pet_type()),
        id: pet.id().map_or(0, PetId::get),
        visits: visit::to_dtos(pet.visits()),
        owner_id: pet.owner_id().map(OwnerId::get),
    }
}

pub fn to_nullable_dto(pet: Option<&Pet>) -> Option<PetDto> {
    pet.map(to_dto)
}

pub fn to_entity(dto: PetDto) -> Pet {
    let mut pet = Pet::new();
    pet.set_name(Some(dto.name));
    pet.set_birth_date(Some(dto.birth_date));
    pet.set_pet_type(dto.pet_type.map(pet_type::to_entity));
    if let Some(id) = assigned(dto.id, PetId::new) {
        pet.assign_id(id);
    }
    if let Some(owner_id) = dto.owner_id {
        pet.attach_to_owner(OwnerId::new(owner_id));
    }
    pet.set_visits(visit::to_entities(dto.visits));
    pet
}

pub fn from_fields(dto: PetFieldsDto) -> Pet {
    let mut pet = Pet::new();
    pet.set_name(Some(dto.name));
    pet.set_birth_date(Some(dto.birth_date));
    pet.set_pet_type(Some(pet_type::to_entity(dto.pet_type)));
    pet
}

pub fn apply_fields(pet: &mut Pet, dto: PetFieldsDto) {
    pet.set_birth_date(Some(dto.birth_date));
    pet.set_name(Some(dto.name));
    pet.set_pet_type(Some(pet_type::to_entity(dto.pet_type)));
}

pub fn to_dtos<'a>(pets: impl IntoIterator<Item = &'a Pet>) -> Vec<PetDto> {
    pets.into_iter().map(to_dto).collect()
}

pub fn to_entities(dtos: Vec<PetDto>) -> Vec<Pet> {
    dtos.into_iter().map(to_entity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use petclinic_core::VisitId;
    use petclinic_owners::Visit;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn visits_are_emitted_newest_first() {
        let mut pet = Pet::new();
        pet.assign_id(PetId::new(1));
        for (id, day) in [(1, date(2021, 1, 1)), (2, date(2023, 6, 15)), (3, date(2020, 3, 3))] {
            let mut visit = Visit::new(day, None);
            visit.assign_id(VisitId::new(id));
            pet.add_visit(visit);
        }

        let dates: Vec<_> = to_dto(&pet).visits.iter().filter_map(|v| v.date).collect();
        assert_eq!(dates, vec![date(2023, 6, 15), date(2021, 1, 1), date(2020, 3, 3)]);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let dto = to_dto(&Pet::new());
        assert_eq!(dto.name, "");
        assert_eq!(dto.birth_date, today());
        assert_eq!(dto.pet_type, None);
        assert_eq!(dto.id, 0);
        assert_eq!(dto.owner_id, None);
    }

    #[test]
    fn full_dto_attaches_visits_to_the_pet() {
        let dto = PetDto {
            name: "Leo".to_string(),
            birth_date: date(2010, 9, 7),
            pet_type: None,
            id: 4,
            visits: vec![crate::app::dto::VisitDto {
                description: "neutered".to_string(),
                id: 0,
                date: Some(date(2013, 1, 4)),
                pet_id: Some(99),
            }],
            owner_id: Some(2),
        };

        let pet = to_entity(dto);
        assert_eq!(pet.owner_id(), Some(OwnerId::new(2)));
        assert_eq!(pet.visits()[0].pet_id(), Some(PetId::new(4)));
    }
}
