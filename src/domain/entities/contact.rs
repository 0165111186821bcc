/// A contact form submission that has passed validation and sanitization.
///
/// Every field already satisfies the validator's acceptance predicate:
/// `name` is at most 200 characters with no CR/LF or angle brackets,
/// `email` is trimmed and lowercased, `message` is at most 5000 characters
/// with no CR/LF or angle brackets. Consumed once by the email dispatcher,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContact {
    pub name: String,
    pub email: String,
    pub message: String,
}
