//! Common validation utilities.

use validator::ValidationErrors;

/// Flattens `validator` errors into a single human-readable message.
///
/// Fields are sorted so the message is stable regardless of hash ordering.
/// Errors without a custom message fall back to their code.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, err.code),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_format_single_error_uses_message() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("connection name cannot be empty".into());
        errors.add("name", err);

        assert_eq!(
            format_validation_errors(&errors),
            "connection name cannot be empty"
        );
    }

    #[test]
    fn test_format_error_without_message_uses_code() {
        let mut errors = ValidationErrors::new();
        errors.add("callback_url", ValidationError::new("length"));

        assert_eq!(format_validation_errors(&errors), "callback_url: length");
    }

    #[test]
    fn test_format_multiple_errors_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        let mut second = ValidationError::new("length");
        second.message = Some("system type cannot be empty".into());
        errors.add("system_type", second);
        let mut first = ValidationError::new("length");
        first.message = Some("access token cannot be empty".into());
        errors.add("access_token", first);

        assert_eq!(
            format_validation_errors(&errors),
            "access token cannot be empty, system type cannot be empty"
        );
    }

    #[test]
    fn test_format_empty_errors() {
        let errors = ValidationErrors::new();
        assert_eq!(format_validation_errors(&errors), "");
    }
}
