//! Contact form state types.
//!
//! This module contains the validated form fields and their field-level
//! validation errors.

use serde::{Deserialize, Serialize};

/// Specifying the validated contact form fields.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Message,
}

impl Field {
    /// Name of the form input carrying this field.
    ///
    pub fn name(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

/// Field-level validation failures. The display text is the inline message
/// shown next to the field.
///
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Message must be at least {min} characters")]
    MessageTooShort { min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(Field::Email.name(), "email");
        assert_eq!(Field::Message.name(), "message");
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::Required.to_string(), "This field is required");
        assert!(ValidationError::InvalidEmail.to_string().contains("valid email"));
        assert_eq!(
            ValidationError::MessageTooShort { min: 10 }.to_string(),
            "Message must be at least 10 characters"
        );
    }
}
