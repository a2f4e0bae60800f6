use petclinic_core::{Entity, VetId};

use crate::Specialty;

/// A veterinarian and the specialties they practice.
///
/// The specialty collection has set semantics for persisted specialties: a
/// specialty whose identifier is already present is not added twice.
#[derive(Debug, Clone, Default)]
pub struct Vet {
    id: Option<VetId>,
    first_name: Option<String>,
    last_name: Option<String>,
    specialties: Vec<Specialty>,
}

impl Vet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn set_first_name(&mut self, value: Option<String>) {
        self.first_name = value;
    }

    pub fn set_last_name(&mut self, value: Option<String>) {
        self.last_name = value;
    }

    pub fn assign_id(&mut self, id: VetId) {
        self.id = Some(id);
    }

    /// Specialties sorted by name, ascending (plain lexical order).
    ///
    /// Recomputed on every call; the returned view cannot change membership.
    pub fn specialties(&self) -> Vec<&Specialty> {
        let mut sorted: Vec<&Specialty> = self.specialties.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(&b.name()));
        sorted
    }

    /// Specialties in insertion order.
    pub fn specialties_internal(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }

    pub fn add_specialty(&mut self, specialty: Specialty) {
        if self.specialties.iter().any(|s| s.same_identity(&specialty)) {
            return;
        }
        self.specialties.push(specialty);
    }

    pub fn set_specialties(&mut self, specialties: Vec<Specialty>) {
        self.clear_specialties();
        for specialty in specialties {
            self.add_specialty(specialty);
        }
    }

    pub fn clear_specialties(&mut self) {
        self.specialties.clear();
    }
}

impl Entity for Vet {
    type Id = VetId;

    fn id(&self) -> Option<VetId> {
        self.id
    }
}

impl PartialEq for Vet {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}
