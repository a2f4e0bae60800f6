//! Pet clinic API: DTOs, mapping, validation reporting, use cases and
//! request handlers.

pub mod app;
