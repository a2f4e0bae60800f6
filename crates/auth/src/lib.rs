//! `petclinic-auth` — user accounts and their roles.
//!
//! Only the data model lives here; authentication and authorization checks
//! are performed by the surrounding web layer.

pub mod roles;
pub mod user;

pub use roles::{ADMIN, OWNER_ADMIN, ROLE_PREFIX, VET_ADMIN, with_role_prefix};
pub use user::{Role, User};
