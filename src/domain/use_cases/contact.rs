use serde_json::Value;

use crate::{
    entities::contact::SanitizedContact,
    errors::ValidationError,
    utils::sanitize::{is_valid_email, sanitize_string},
};

const NAME_MAX_LENGTH: usize = 200;
const MESSAGE_MAX_LENGTH: usize = 5000;

/// Validates and sanitizes an arbitrary parsed-JSON contact submission.
///
/// Checks run in field order name -> email -> message and the first failure
/// short-circuits, so clients always see the earliest violated rule.
pub fn validate_contact_form(data: &Value) -> Result<SanitizedContact, ValidationError> {
    let Some(fields) = data.as_object() else {
        return Err(ValidationError::InvalidBody);
    };

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| name.trim().chars().count() >= 2)
        .ok_or(ValidationError::NameTooShort)?;

    let email = fields
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| is_valid_email(email))
        .ok_or(ValidationError::InvalidEmail)?;

    let message = fields
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| message.trim().chars().count() >= 10)
        .ok_or(ValidationError::MessageTooShort)?;

    Ok(SanitizedContact {
        name: sanitize_string(name, NAME_MAX_LENGTH),
        // The email is normalized but deliberately not run through
        // `sanitize_string`; `is_valid_email` already excludes angle
        // brackets and whitespace.
        email: email.trim().to_lowercase(),
        message: sanitize_string(message, MESSAGE_MAX_LENGTH),
    })
}
