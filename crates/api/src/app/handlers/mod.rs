//! Request handlers, one file per resource.
//!
//! Handlers are framing-free: they take already-decoded path parameters and
//! bodies, and return a [`Reply`] or an [`ApiError`] for the HTTP layer to
//! render.

use http::header::{CONTENT_TYPE, LOCATION};
use http::{Response, StatusCode};
use serde::Serialize;

use crate::app::dto::BindingTarget;
use crate::app::errors::{ApiError, BindingErrorsResponse};
use crate::app::validation::field_errors;

pub mod owners;
pub mod pet_types;
pub mod pets;
pub mod specialties;
pub mod users;
pub mod vets;
pub mod visits;

/// Successful handler outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Option<T>,
}

impl<T> Reply<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            location: None,
            body: Some(body),
        }
    }

    pub fn created(body: T, location: Option<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            location,
            body: Some(body),
        }
    }

    pub fn no_content(body: Option<T>) -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            location: None,
            body,
        }
    }
}

impl<T: Serialize> Reply<T> {
    /// Render as an HTTP response with a JSON body.
    pub fn into_response(self) -> http::Result<Response<String>> {
        let mut builder = Response::builder().status(self.status);
        if let Some(location) = &self.location {
            builder = builder.header(LOCATION, location.as_str());
        }
        match self.body {
            Some(body) => {
                let json = serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string());
                builder.header(CONTENT_TYPE, "application/json").body(json)
            }
            None => builder.body(String::new()),
        }
    }
}

pub type HandlerResult<T> = Result<Reply<T>, ApiError>;

/// Reject `dto` with its binding errors if it fails validation.
pub(crate) fn validate<T: BindingTarget>(dto: &T) -> Result<(), ApiError> {
    let errors = field_errors(dto);
    if errors.is_empty() {
        return Ok(());
    }
    let mut response = BindingErrorsResponse::default();
    response.add_all_errors(errors);
    tracing::warn!(
        object = T::OBJECT_NAME,
        errors = response.errors().len(),
        "request rejected by validation"
    );
    Err(ApiError::Validation(response))
}

/// Reject a body identifier that is inconsistent with the request path.
///
/// Create requests have no path id, so any assigned body id is rejected.
pub(crate) fn check_body_id(
    object: &'static str,
    path_id: Option<u32>,
    body_id: Option<u32>,
) -> Result<(), ApiError> {
    let errors = BindingErrorsResponse::new(path_id, body_id);
    if errors.is_empty() {
        return Ok(());
    }
    tracing::warn!(object, ?path_id, ?body_id, "request body id rejected");
    Err(ApiError::Validation(errors))
}

/// Body id of a create request; `0` is the wire form of "unassigned".
pub(crate) fn create_body_id(id: u32) -> Option<u32> {
    (id != 0).then_some(id)
}

/// `NotFound` for an empty listing.
pub(crate) fn non_empty<T>(items: Vec<T>) -> Result<Vec<T>, ApiError> {
    if items.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(items)
}

pub(crate) fn location(resource: &str, id: Option<impl std::fmt::Display>) -> Option<String> {
    id.map(|id| format!("/api/{resource}/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_reply_renders_location_and_json() {
        let response = Reply::created(vec![1, 2], location("owners", Some(7)))
            .into_response()
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[LOCATION], "/api/owners/7");
        assert_eq!(response.body(), "[1,2]");
    }

    #[test]
    fn create_requests_must_not_carry_an_id() {
        assert!(check_body_id("petTypeDto", None, create_body_id(0)).is_ok());
        match check_body_id("petTypeDto", None, create_body_id(u32::MAX)) {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(errors.errors()[0].field_value, u32::MAX.to_string());
                assert_eq!(errors.errors()[0].error_message, "must not be specified");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_listing_is_not_found() {
        assert!(matches!(non_empty(Vec::<u8>::new()), Err(ApiError::NotFound)));
    }
}
