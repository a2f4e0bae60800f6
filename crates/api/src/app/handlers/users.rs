use super::{HandlerResult, Reply, validate};
use crate::app::dto::UserDto;
use crate::app::mapper::user;
use crate::app::services::UserService;

/// Create a user. Role names are prefixed by the service.
pub fn add_user(service: &UserService, dto: UserDto) -> HandlerResult<UserDto> {
    validate(&dto)?;
    let mut user = user::to_entity(dto);
    service.save_user(&mut user)?;
    Ok(Reply::created(user::to_dto(&user), None))
}
