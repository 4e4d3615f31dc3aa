//! Contact form field rules.

use crate::state::{Field, ValidationError};
use regex::Regex;
use std::sync::OnceLock;

/// Shortest accepted message, in characters.
///
pub const MIN_MESSAGE_LENGTH: usize = 10;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Check a `local@domain.tld` shaped address.
///
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate a field value. Surrounding whitespace is ignored; emptiness is
/// reported before any field-specific rule.
///
pub fn validate(field: Field, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required);
    }
    match field {
        Field::Email if !is_valid_email(value) => Err(ValidationError::InvalidEmail),
        Field::Message if value.chars().count() < MIN_MESSAGE_LENGTH => {
            Err(ValidationError::MessageTooShort {
                min: MIN_MESSAGE_LENGTH,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    #[test]
    fn test_email_examples() {
        assert_eq!(validate(Field::Email, "a@b.co"), Ok(()));
        assert_eq!(
            validate(Field::Email, "not-an-email"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(validate(Field::Email, ""), Err(ValidationError::Required));
    }

    #[test]
    fn test_email_edge_cases() {
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.co"));
        assert_eq!(validate(Field::Email, "  a@b.co  "), Ok(()));
        assert_eq!(validate(Field::Email, "   "), Err(ValidationError::Required));
    }

    #[test]
    fn test_generated_emails_are_valid() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert_eq!(validate(Field::Email, &email), Ok(()), "{}", email);
        }
    }

    #[test]
    fn test_message_length_boundary() {
        assert_eq!(
            validate(Field::Message, "123456789"),
            Err(ValidationError::MessageTooShort { min: 10 })
        );
        assert_eq!(validate(Field::Message, "1234567890"), Ok(()));
        // Trimmed before measuring
        assert!(validate(Field::Message, " 123456789 ").is_err());
        // Counted in characters, not bytes
        assert_eq!(validate(Field::Message, "éééééééééé"), Ok(()));
    }
}
