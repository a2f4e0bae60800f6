//! Pet clinic application layer.
//!
//! Folder layout:
//! - `dto.rs`: wire DTOs and their structural constraints
//! - `mapper/`: entity <-> DTO mapping, one module per entity
//! - `validation.rs`: `validator` reports -> field errors
//! - `errors.rs`: binding-errors payload and request errors
//! - `services.rs`: use-case facade over the repositories
//! - `handlers/`: request handlers (one file per resource)

pub mod dto;
pub mod errors;
pub mod handlers;
pub mod mapper;
pub mod services;
pub mod validation;

pub use errors::{ApiError, BindingErrorsResponse};
pub use services::{ClinicService, Repositories, ServiceError, UserService, in_memory_services};
