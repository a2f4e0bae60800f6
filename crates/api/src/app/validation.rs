//! Bridge from `validator` reports to field-level errors.

use std::borrow::Cow;

use serde_json::Value;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::app::dto::BindingTarget;

/// One rejected DTO field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub object_name: String,
    /// Wire path of the field, e.g. `type.name` or `specialties[0].name`.
    pub field: String,
    pub rejected_value: Option<String>,
    pub message: String,
}

/// Validate `dto` and flatten every failure into a [`FieldError`], ordered by
/// field path.
pub fn field_errors<T: BindingTarget>(dto: &T) -> Vec<FieldError> {
    let Err(errors) = dto.validate() else {
        return Vec::new();
    };
    let mut out = Vec::new();
    collect(T::OBJECT_NAME, "", &errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(object_name: &str, prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            wire_name(field).into_owned()
        } else {
            format!("{prefix}.{}", wire_name(field))
        };
        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    out.push(FieldError {
                        object_name: object_name.to_string(),
                        field: path.clone(),
                        rejected_value: failure.params.get("value").and_then(rejected_value),
                        message: failure
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| failure.code.to_string()),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(object_name, &path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(object_name, &format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn rejected_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Rust field name -> wire name (`first_name` -> `firstName`, `pet_type` -> `type`).
fn wire_name(field: &str) -> Cow<'_, str> {
    if field == "pet_type" {
        return Cow::Borrowed("type");
    }
    if !field.contains('_') {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::dto::{OwnerFieldsDto, PetFieldsDto, PetTypeDto, SpecialtyDto, VetFieldsDto};
    use chrono::NaiveDate;

    #[test]
    fn wire_names() {
        assert_eq!(wire_name("first_name"), "firstName");
        assert_eq!(wire_name("pet_type"), "type");
        assert_eq!(wire_name("name"), "name");
    }

    #[test]
    fn flat_field_errors_carry_object_name_and_value() {
        let dto = OwnerFieldsDto {
            first_name: "George".to_string(),
            last_name: "Franklin".to_string(),
            address: "110 W. Liberty St.".to_string(),
            city: "Madison".to_string(),
            telephone: "608-555".to_string(),
        };

        let errors = field_errors(&dto);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].object_name, "ownerFieldsDto");
        assert_eq!(errors[0].field, "telephone");
        assert_eq!(errors[0].rejected_value.as_deref(), Some("608-555"));
        assert_eq!(errors[0].message, "must match \"[0-9]*\"");
    }

    #[test]
    fn nested_paths_use_wire_names() {
        let pet = PetFieldsDto {
            name: "Leo".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 9, 7).unwrap(),
            pet_type: PetTypeDto {
                id: 1,
                name: String::new(),
            },
        };
        let errors = field_errors(&pet);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "type.name");

        let vet = VetFieldsDto {
            first_name: "James".to_string(),
            last_name: "Carter".to_string(),
            specialties: vec![SpecialtyDto {
                id: 1,
                name: String::new(),
            }],
        };
        let errors = field_errors(&vet);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "specialties[0].name");
        assert_eq!(errors[0].rejected_value.as_deref(), Some(""));
    }

    #[test]
    fn valid_dto_has_no_errors() {
        let dto = SpecialtyDto {
            id: 0,
            name: "radiology".to_string(),
        };
        assert!(field_errors(&dto).is_empty());
    }
}
