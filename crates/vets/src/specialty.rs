use petclinic_core::{Entity, SpecialtyId};

/// Shared lookup entity: a field of specialty of vets ("radiology", ...).
#[derive(Debug, Clone, Default)]
pub struct Specialty {
    id: Option<SpecialtyId>,
    name: Option<String>,
}

impl Specialty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Reference to an already persisted row.
    pub fn with_id(id: SpecialtyId, name: Option<String>) -> Self {
        Self { id: Some(id), name }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn assign_id(&mut self, id: SpecialtyId) {
        self.id = Some(id);
    }
}

impl Entity for Specialty {
    type Id = SpecialtyId;

    fn id(&self) -> Option<SpecialtyId> {
        self.id
    }
}

impl PartialEq for Specialty {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}
