//! Validation utilities.

use crate::{FieldError, MemoError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `MemoError` on failure.
    fn validate_request(&self) -> Result<(), MemoError> {
        self.validate().map_err(validation_errors_to_memo_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `MemoError`.
#[must_use]
pub fn validation_errors_to_memo_error(errors: ValidationErrors) -> MemoError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    MemoError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Draft {
        #[validate(custom(function = "rules::not_blank"))]
        content: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(rules::not_blank("memo").is_ok());
        assert!(rules::not_blank("   \n").is_err());
    }

    #[test]
    fn test_validate_request_maps_to_validation_error() {
        let draft = Draft {
            content: "  ".to_string(),
        };
        let err = draft.validate_request().unwrap_err();
        assert!(matches!(err, MemoError::Validation(ref msg) if msg.contains("content")));

        let ok = Draft {
            content: "hi".to_string(),
        };
        assert!(ok.validate_request().is_ok());
    }
}
