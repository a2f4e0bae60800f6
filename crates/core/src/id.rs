//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are non-negative integers assigned by the persistence layer on
//! first save. An entity that has not been saved yet carries `None`, which is
//! distinct from the identifier `0`.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a pet owner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(u32);

/// Identifier of a pet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(u32);

/// Identifier of a vet visit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(u32);

/// Identifier of a pet type (shared lookup row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetTypeId(u32);

/// Identifier of a veterinarian.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VetId(u32);

/// Identifier of a vet specialty (shared lookup row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialtyId(u32);

/// Identifier of a user role row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(u32);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $t {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .parse::<u32>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(OwnerId, "OwnerId");
impl_int_newtype!(PetId, "PetId");
impl_int_newtype!(VisitId, "VisitId");
impl_int_newtype!(PetTypeId, "PetTypeId");
impl_int_newtype!(VetId, "VetId");
impl_int_newtype!(SpecialtyId, "SpecialtyId");
impl_int_newtype!(RoleId, "RoleId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_non_negative_integers() {
        let id: OwnerId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_negative_and_garbage() {
        for raw in ["-1", "abc", ""] {
            match raw.parse::<PetId>() {
                Err(DomainError::InvalidId(msg)) => assert!(msg.starts_with("PetId")),
                other => panic!("Expected InvalidId for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_is_a_real_identifier() {
        let zero = Some(VisitId::new(0));
        assert_ne!(zero, None);
    }
}
