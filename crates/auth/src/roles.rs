use std::borrow::Cow;

/// Prefix every persisted role name carries.
pub const ROLE_PREFIX: &str = "ROLE_";

/// May manage owners, pets and visits.
pub const OWNER_ADMIN: &str = "ROLE_OWNER_ADMIN";

/// May manage vets, specialties and pet types.
pub const VET_ADMIN: &str = "ROLE_VET_ADMIN";

/// May manage users.
pub const ADMIN: &str = "ROLE_ADMIN";

/// Returns `name` with the `ROLE_` prefix, borrowing when it is already there.
pub fn with_role_prefix(name: &str) -> Cow<'_, str> {
    if name.starts_with(ROLE_PREFIX) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{ROLE_PREFIX}{name}"))
    }
}
