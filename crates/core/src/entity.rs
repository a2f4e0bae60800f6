//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by the persistence layer, so it is optional until the
/// entity has been saved once.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, `None` while transient.
    fn id(&self) -> Option<Self::Id>;

    /// Whether the entity has never been persisted.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Identity equality.
    ///
    /// Two persisted entities are the same when their identifiers match. A
    /// transient entity is only ever the same as itself.
    fn same_identity(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => core::ptr::eq(self, other),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(Option<u32>);

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> Option<u32> {
            self.0
        }
    }

    #[test]
    fn persisted_entities_compare_by_id() {
        assert!(Row(Some(1)).same_identity(&Row(Some(1))));
        assert!(!Row(Some(1)).same_identity(&Row(Some(2))));
        assert!(!Row(Some(1)).same_identity(&Row(None)));
    }

    #[test]
    fn transient_entities_are_only_equal_to_themselves() {
        let a = Row(None);
        let b = Row(None);
        assert!(a.same_identity(&a));
        assert!(!a.same_identity(&b));
        assert!(a.is_new());
    }
}
