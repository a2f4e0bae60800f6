//! Entity <-> DTO mapping.
//!
//! One module per entity. Mapping to a DTO is total: missing strings become
//! `""`, missing wire ids become `0` and a missing required date becomes
//! today. Mapping from a DTO treats a wire id of `0` as unassigned.
//! This is the only place where dates are defaulted.

use chrono::NaiveDate;

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod specialty;
pub mod user;
pub mod vet;
pub mod visit;

/// Current local date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Wire id -> entity id; `0` means "not assigned".
pub(crate) fn assigned<T>(id: u32, make: impl FnOnce(u32) -> T) -> Option<T> {
    (id != 0).then(|| make(id))
}
