use petclinic_core::{Entity, PetTypeId};

/// Shared lookup entity: the kind of a pet ("cat", "dog", ...).
#[derive(Debug, Clone, Default)]
pub struct PetType {
    id: Option<PetTypeId>,
    name: Option<String>,
}

impl PetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Reference to an already persisted row.
    pub fn with_id(id: PetTypeId, name: Option<String>) -> Self {
        Self { id: Some(id), name }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn assign_id(&mut self, id: PetTypeId) {
        self.id = Some(id);
    }
}

impl Entity for PetType {
    type Id = PetTypeId;

    fn id(&self) -> Option<PetTypeId> {
        self.id
    }
}

impl PartialEq for PetType {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}
