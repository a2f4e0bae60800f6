use http::header::{CONTENT_TYPE, HeaderName};
use http::{Response, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::app::services::ServiceError;
use crate::app::validation::FieldError;

/// Response header carrying the serialized binding errors.
pub static ERRORS_HEADER: HeaderName = HeaderName::from_static("errors");

// -------------------------
// Binding errors
// -------------------------

/// One entry of the binding-errors payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingError {
    pub object_name: String,
    pub field_name: String,
    pub field_value: String,
    pub error_message: String,
}

/// Accumulates field-level validation failures for one request.
///
/// Construction also checks that a body identifier is consistent with the
/// identifier in the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingErrorsResponse {
    binding_errors: Vec<BindingError>,
}

impl BindingErrorsResponse {
    pub fn new(path_id: Option<u32>, body_id: Option<u32>) -> Self {
        let mut response = Self::default();
        match (path_id, body_id) {
            (None, Some(body_id)) => response.add_body_id_error(body_id, "must not be specified".to_string()),
            (Some(path_id), Some(body_id)) if path_id != body_id => {
                response.add_body_id_error(body_id, format!("does not match pathId: {path_id}"))
            }
            _ => {}
        }
        response
    }

    fn add_body_id_error(&mut self, body_id: u32, message: String) {
        self.binding_errors.push(BindingError {
            object_name: "body".to_string(),
            field_name: "id".to_string(),
            field_value: body_id.to_string(),
            error_message: message,
        });
    }

    pub fn add_all_errors(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.binding_errors.extend(errors.into_iter().map(|e| BindingError {
            object_name: e.object_name,
            field_name: e.field,
            field_value: e.rejected_value.unwrap_or_default(),
            error_message: e.message,
        }));
    }

    pub fn errors(&self) -> &[BindingError] {
        &self.binding_errors
    }

    pub fn is_empty(&self) -> bool {
        self.binding_errors.is_empty()
    }

    /// `{"bindingErrors":[...]}`, or an empty string if serialization fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

// -------------------------
// Request errors
// -------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("request validation failed ({} binding errors)", .0.errors().len())]
    Validation(BindingErrorsResponse),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorInfo<'a> {
    class_name: &'a str,
    ex_message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Domain(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `errors` header, for validation failures only.
    pub fn errors_header(&self) -> Option<String> {
        match self {
            ApiError::Validation(errors) => Some(errors.to_json()),
            _ => None,
        }
    }

    /// `{"className","exMessage"}` body for service failures, `"{}"` if it
    /// cannot be serialized.
    pub fn body(&self) -> Option<String> {
        let ApiError::Service(err) = self else {
            return None;
        };
        let class_name = match err {
            ServiceError::Domain(e) => std::any::type_name_of_val(e),
            ServiceError::Repository(e) => std::any::type_name_of_val(e),
        };
        let info = ErrorInfo {
            class_name,
            ex_message: err.to_string(),
        };
        Some(serde_json::to_string(&info).unwrap_or_else(|_| "{}".to_string()))
    }

    /// Render as an HTTP response (status, `errors` header, JSON body).
    pub fn into_response(self) -> http::Result<Response<String>> {
        let mut builder = Response::builder().status(self.status());
        if let Some(errors) = self.errors_header() {
            builder = builder.header(&ERRORS_HEADER, errors);
        }
        match self.body() {
            Some(body) => builder.header(CONTENT_TYPE, "application/json").body(body),
            None => builder.body(String::new()),
        }
    }
}
