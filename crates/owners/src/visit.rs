use chrono::NaiveDate;

use petclinic_core::{Entity, PetId, VisitId};

/// A booking for a vet visit.
///
/// The date is always present on the entity: callers that accept an optional
/// date from clients resolve the "today" default before constructing one.
#[derive(Debug, Clone)]
pub struct Visit {
    id: Option<VisitId>,
    description: Option<String>,
    date: NaiveDate,
    pet_id: Option<PetId>,
}

impl Visit {
    pub fn new(date: NaiveDate, description: Option<String>) -> Self {
        Self {
            id: None,
            description,
            date,
            pet_id: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Back-reference to the pet this visit belongs to.
    pub fn pet_id(&self) -> Option<PetId> {
        self.pet_id
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn assign_id(&mut self, id: VisitId) {
        self.id = Some(id);
    }

    /// Attach to a pet known only by identifier (no need to load the pet).
    ///
    /// Visits held inside a `Pet` are attached through `Pet::add_visit`.
    pub fn attach_to_pet(&mut self, pet_id: PetId) {
        self.pet_id = Some(pet_id);
    }

    pub(crate) fn set_pet_id(&mut self, pet_id: Option<PetId>) {
        self.pet_id = pet_id;
    }
}

impl Entity for Visit {
    type Id = VisitId;

    fn id(&self) -> Option<VisitId> {
        self.id
    }
}

impl PartialEq for Visit {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}
