//! User accounts and the roles granted to them.
//!
//! A user is identified by its username. Roles are owned by the user and point
//! back to it by username once attached.

use petclinic_core::{Entity, RoleId};

// ─────────────────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────────────────

/// A role granted to a user (e.g. `ROLE_OWNER_ADMIN`).
#[derive(Debug, Clone, Default)]
pub struct Role {
    id: Option<RoleId>,
    name: Option<String>,
    username: Option<String>,
}

impl Role {
    pub fn new(name: Option<String>) -> Self {
        Self {
            id: None,
            name,
            username: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Back-reference to the owning user.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn attach_to_user(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn assign_id(&mut self, id: RoleId) {
        self.id = Some(id);
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> Option<RoleId> {
        self.id
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A user account.
///
/// # Invariants
/// - Persisted users hold at least one role, every role name carries the
///   `ROLE_` prefix and points back to the user. These are enforced when the
///   user is saved, not while it is being assembled.
#[derive(Debug, Clone, Default)]
pub struct User {
    username: String,
    password: Option<String>,
    enabled: Option<bool>,
    roles: Vec<Role>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn set_password(&mut self, password: Option<String>) {
        self.password = password;
    }

    pub fn set_enabled(&mut self, enabled: Option<bool>) {
        self.enabled = enabled;
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut [Role] {
        &mut self.roles
    }

    /// Append a new role with the given name, as-is.
    ///
    /// Neither the `ROLE_` prefix nor the back-reference is set here.
    pub fn add_role(&mut self, role_name: impl Into<String>) {
        self.roles.push(Role::new(Some(role_name.into())));
    }

    pub fn set_roles(&mut self, roles: Vec<Role>) {
        self.roles = roles;
    }
}

/// Users are identified by username.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}
