use chrono::NaiveDate;

use petclinic_core::{Entity, OwnerId, PetId, VisitId};

use crate::{PetType, Visit};

/// A pet, owned by an `Owner` and owning its `Visit`s.
///
/// # Invariants
/// - Every visit held by the pet has `pet_id() == self.id()`; `add_visit`,
///   `set_visits`, `assign_id` and the `edit_*` methods keep this true.
/// - `owner_id` is only set through `Owner::add_pet` or `attach_to_owner`.
#[derive(Debug, Clone, Default)]
pub struct Pet {
    id: Option<PetId>,
    name: Option<String>,
    birth_date: Option<NaiveDate>,
    pet_type: Option<PetType>,
    owner_id: Option<OwnerId>,
    visits: Vec<Visit>,
}

impl Pet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn pet_type(&self) -> Option<&PetType> {
        self.pet_type.as_ref()
    }

    /// Back-reference to the owning owner.
    pub fn owner_id(&self) -> Option<OwnerId> {
        self.owner_id
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) {
        self.birth_date = birth_date;
    }

    pub fn set_pet_type(&mut self, pet_type: Option<PetType>) {
        self.pet_type = pet_type;
    }

    /// Assign the persisted identifier and re-stamp every visit's back-reference.
    pub fn assign_id(&mut self, id: PetId) {
        self.id = Some(id);
        for visit in &mut self.visits {
            visit.set_pet_id(self.id);
        }
    }

    /// Attach to an owner known only by identifier (no need to load the owner).
    ///
    /// Pets held inside an `Owner` are attached through `Owner::add_pet`.
    pub fn attach_to_owner(&mut self, owner_id: OwnerId) {
        self.owner_id = Some(owner_id);
    }

    pub(crate) fn set_owner_id(&mut self, owner_id: Option<OwnerId>) {
        self.owner_id = owner_id;
    }

    /// Visits sorted by date, most recent first.
    ///
    /// Recomputed on every call; the returned view cannot change membership.
    pub fn visits(&self) -> Vec<&Visit> {
        let mut sorted: Vec<&Visit> = self.visits.iter().collect();
        sorted.sort_by(|a, b| b.date().cmp(&a.date()));
        sorted
    }

    /// Visits in insertion order.
    pub fn visits_internal(&self) -> &[Visit] {
        &self.visits
    }

    /// Edit one held visit in place. Returns `None` when no visit has that id.
    ///
    /// The visit stays attached to this pet whatever `f` does to it.
    pub fn edit_visit<R>(&mut self, id: VisitId, f: impl FnOnce(&mut Visit) -> R) -> Option<R> {
        let pet_id = self.id;
        let visit = self.visits.iter_mut().find(|v| v.id() == Some(id))?;
        let out = f(visit);
        visit.set_pet_id(pet_id);
        Some(out)
    }

    /// Run `f` over every held visit in insertion order, stopping at the
    /// first error. Back-references are re-stamped before and after each call.
    pub fn try_edit_visits<E>(&mut self, mut f: impl FnMut(&mut Visit) -> Result<(), E>) -> Result<(), E> {
        let pet_id = self.id;
        for visit in &mut self.visits {
            visit.set_pet_id(pet_id);
            let result = f(visit);
            visit.set_pet_id(pet_id);
            result?;
        }
        Ok(())
    }

    /// Replace all visits, attaching each one to this pet.
    pub fn set_visits(&mut self, visits: Vec<Visit>) {
        self.visits.clear();
        for visit in visits {
            self.add_visit(visit);
        }
    }

    pub fn add_visit(&mut self, mut visit: Visit) {
        visit.set_pet_id(self.id);
        self.visits.push(visit);
    }
}

impl Entity for Pet {
    type Id = PetId;

    fn id(&self) -> Option<PetId> {
        self.id
    }
}

impl PartialEq for Pet {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_pet() -> Pet {
        let mut pet = Pet::new();
        pet.set_name(Some("Leo".to_string()));
        pet.assign_id(PetId::new(1));
        pet
    }

    #[test]
    fn add_visit_sets_back_reference() {
        let mut pet = test_pet();
        pet.add_visit(Visit::new(date(2024, 1, 1), Some("checkup".to_string())));

        let visit = &pet.visits_internal()[0];
        assert_eq!(visit.pet_id(), pet.id());
    }

    #[test]
    fn visits_are_sorted_newest_first() {
        let mut pet = test_pet();
        for d in [date(2021, 1, 1), date(2023, 6, 15), date(2020, 3, 3)] {
            pet.add_visit(Visit::new(d, None));
        }

        let dates: Vec<NaiveDate> = pet.visits().iter().map(|v| v.date()).collect();
        assert_eq!(dates, vec![date(2023, 6, 15), date(2021, 1, 1), date(2020, 3, 3)]);

        // Underlying insertion order untouched.
        assert_eq!(pet.visits_internal()[0].date(), date(2021, 1, 1));
    }

    #[test]
    fn visits_view_is_recomputed_identically() {
        let mut pet = test_pet();
        pet.add_visit(Visit::new(date(2022, 2, 2), None));
        pet.add_visit(Visit::new(date(2022, 5, 5), None));

        let first: Vec<NaiveDate> = pet.visits().iter().map(|v| v.date()).collect();
        let second: Vec<NaiveDate> = pet.visits().iter().map(|v| v.date()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn never_populated_visits_read_as_empty() {
        let pet = Pet::new();
        assert!(pet.visits().is_empty());
        assert!(pet.visits_internal().is_empty());
    }

    #[test]
    fn assign_id_restamps_transient_visits() {
        let mut pet = Pet::new();
        pet.add_visit(Visit::new(date(2024, 6, 1), None));
        assert_eq!(pet.visits_internal()[0].pet_id(), None);

        pet.assign_id(PetId::new(9));
        assert_eq!(pet.visits_internal()[0].pet_id(), Some(PetId::new(9)));
    }

    #[test]
    fn set_visits_attaches_every_visit() {
        let mut pet = test_pet();
        let mut foreign = Visit::new(date(2024, 1, 1), None);
        foreign.attach_to_pet(PetId::new(99));

        pet.set_visits(vec![foreign, Visit::new(date(2024, 2, 1), None)]);
        assert!(pet.visits_internal().iter().all(|v| v.pet_id() == Some(PetId::new(1))));
    }

    #[test]
    fn held_visits_cannot_be_reattached_elsewhere() {
        let mut pet = test_pet();
        let mut visit = Visit::new(date(2024, 1, 1), None);
        visit.assign_id(VisitId::new(7));
        pet.add_visit(visit);

        pet.edit_visit(VisitId::new(7), |visit| {
            visit.set_description(Some("booster".to_string()));
            visit.attach_to_pet(PetId::new(42));
        });
        assert_eq!(pet.visits_internal()[0].description(), Some("booster"));
        assert_eq!(pet.visits_internal()[0].pet_id(), Some(PetId::new(1)));

        pet.try_edit_visits(|visit| {
            visit.attach_to_pet(PetId::new(42));
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(pet.visits_internal()[0].pet_id(), Some(PetId::new(1)));
        assert_eq!(pet.edit_visit(VisitId::new(8), |_| ()), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: the visit view is ordered by date, descending, and keeps every visit.
            #[test]
            fn visits_view_is_sorted_descending(days in proptest::collection::vec(0i64..20_000, 0..30)) {
                let base = date(1970, 1, 1);
                let mut pet = test_pet();
                for d in &days {
                    pet.add_visit(Visit::new(base + chrono::Duration::days(*d), None));
                }

                let view = pet.visits();
                prop_assert_eq!(view.len(), days.len());
                for pair in view.windows(2) {
                    prop_assert!(pair[0].date() >= pair[1].date());
                }
            }
        }
    }
}
