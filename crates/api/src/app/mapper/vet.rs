use petclinic_core::{Entity, VetId};
use petclinic_vets::Vet;

use super::{assigned, specialty, text};
use crate::app::dto::{VetDto, VetFieldsDto};

/// Specialties are emitted sorted by name.
pub fn to_dto(vet: &Vet) -> VetDto {
    VetDto {
        first_name: text(vet.first_name()),
        last_name: text(vet.last_name()),
        specialties: specialty::to_dtos(vet.specialties()),
        id: vet.id().map_or(0, VetId::get),
    }
}

pub fn to_nullable_dto(vet: Option<&Vet>) -> Option<VetDto> {
    vet.map(to_dto)
}

pub fn to_entity(dto: VetDto) -> Vet {
    let mut vet = Vet::new();
    if let Some(id) = assigned(dto.id, VetId::new) {
        vet.assign_id(id);
    }
    vet.set_first_name(Some(dto.first_name));
    vet.set_last_name(Some(dto.last_name));
    vet.set_specialties(specialty::to_entities(dto.specialties));
    vet
}

pub fn from_fields(dto: VetFieldsDto) -> Vet {
    let mut vet = Vet::new();
    apply_fields(&mut vet, dto);
    vet
}

/// Replace names and the whole specialty set.
pub fn apply_fields(vet: &mut Vet, dto: VetFieldsDto) {
    vet.set_first_name(Some(dto.first_name));
    vet.set_last_name(Some(dto.last_name));
    vet.clear_specialties();
    for specialty in specialty::to_entities(dto.specialties) {
        vet.add_specialty(specialty);
    }
}

pub fn to_dtos<'a>(vets: impl IntoIterator<Item = &'a Vet>) -> Vec<VetDto> {
    vets.into_iter().map(to_dto).collect()
}

pub fn to_entities(dtos: Vec<VetDto>) -> Vec<Vet> {
    dtos.into_iter().map(to_entity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::dto::SpecialtyDto;

    fn specialty_dto(id: u32, name: &str) -> SpecialtyDto {
        SpecialtyDto {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn specialties_are_sorted_and_deduplicated() {
        let vet = from_fields(VetFieldsDto {
            first_name: "Linda".to_string(),
            last_name: "Douglas".to_string(),
            specialties: vec![
                specialty_dto(2, "surgery"),
                specialty_dto(3, "dentistry"),
                specialty_dto(2, "surgery"),
            ],
        });

        let dto = to_dto(&vet);
        let names: Vec<_> = dto.specialties.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["dentistry", "surgery"]);
        assert_eq!(dto.id, 0);
    }

    #[test]
    fn apply_fields_replaces_specialties() {
        let mut vet = to_entity(VetDto {
            first_name: "Rafael".to_string(),
            last_name: "Ortega".to_string(),
            specialties: vec![specialty_dto(2, "surgery")],
            id: 4,
        });
        apply_fields(
            &mut vet,
            VetFieldsDto {
                first_name: "Rafael".to_string(),
                last_name: "Ortega".to_string(),
                specialties: vec![specialty_dto(1, "radiology")],
            },
        );

        assert_eq!(vet.id(), Some(VetId::new(4)));
        assert_eq!(to_dto(&vet).specialties, vec![specialty_dto(1, "radiology")]);
    }
}
