use petclinic_auth::{Role, User};

use crate::app::dto::{RoleDto, UserDto};

pub fn role_to_dto(role: &Role) -> RoleDto {
    RoleDto {
        name: role.name().unwrap_or_default().to_string(),
    }
}

/// The role is neither prefixed nor attached here.
pub fn role_to_entity(dto: RoleDto) -> Role {
    Role::new(Some(dto.name))
}

pub fn to_dto(user: &User) -> UserDto {
    UserDto {
        username: user.username().to_string(),
        password: Some(user.password().unwrap_or_default().to_string()),
        enabled: user.enabled(),
        roles: Some(user.roles().iter().map(role_to_dto).collect()),
    }
}

pub fn to_nullable_dto(user: Option<&User>) -> Option<UserDto> {
    user.map(to_dto)
}

pub fn to_entity(dto: UserDto) -> User {
    let mut user = User::new(dto.username);
    user.set_password(dto.password);
    user.set_enabled(dto.enabled);
    user.set_roles(
        dto.roles
            .unwrap_or_default()
            .into_iter()
            .map(role_to_entity)
            .collect(),
    );
    user
}

pub fn to_dtos<'a>(users: impl IntoIterator<Item = &'a User>) -> Vec<UserDto> {
    users.into_iter().map(to_dto).collect()
}

pub fn to_entities(dtos: Vec<UserDto>) -> Vec<User> {
    dtos.into_iter().map(to_entity).collect()
}
