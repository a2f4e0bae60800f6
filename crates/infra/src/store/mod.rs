//! In-memory storage for the clinic schema.

mod in_memory;
mod tables;

pub use in_memory::InMemoryClinicStore;
