use std::ops::Deref;

use validator::{Validate, ValidationErrors};

use crate::core::error::{AppError, Result};

/// A request body that has not passed schema validation yet.
///
/// Deserialized payloads are wrapped in this before anything else touches
/// them; the only way out is `validate`, so services can require `Valid<T>`
/// and never see an unchecked request.
pub struct Unvalidated<T>(T);

impl<T: Validate> Unvalidated<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// The validate-then-submit transition.
    pub fn validate(self) -> Result<Valid<T>> {
        self.0
            .validate()
            .map_err(|e| AppError::Validation(flatten_errors(&e)))?;
        Ok(Valid(self.0))
    }
}

/// A request body that passed schema validation. Read-only from here on.
#[derive(Debug)]
pub struct Valid<T>(T);

impl<T> Valid<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Valid<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Collapse field errors into one message suitable for an inline form error.
fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    collect_messages(errors, &mut messages);
    if messages.is_empty() {
        "Invalid request".to_string()
    } else {
        messages.join("; ")
    }
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    match &err.message {
                        Some(msg) => out.push(msg.to_string()),
                        None => out.push(format!("{} is invalid", field)),
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}
