use actix_web::{
    error::ResponseError,
    http::StatusCode,
    HttpResponse, HttpResponseBuilder,
};
use derive_more::Display;

/// Headers attached to every `/api/contact` response, including errors.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

pub fn apply_cors(builder: &mut HttpResponseBuilder) {
    for (name, value) in CORS_HEADERS {
        builder.insert_header((name, value));
    }
}

/// Contact form rejection reasons, checked in field order. The `Display`
/// strings are the exact client-facing messages.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[display("Invalid request body")]
    InvalidBody,

    #[display("Name must be at least 2 characters")]
    NameTooShort,

    #[display("Invalid email address")]
    InvalidEmail,

    #[display("Message must be at least 10 characters")]
    MessageTooShort,
}

#[derive(Debug, Display)]
pub enum EmailError {
    #[display("Authentication failed. Please check RESEND_API_KEY secret.")]
    AuthenticationFailed,

    #[display("API key lacks permission to send emails. Check API key permissions in Resend dashboard.")]
    PermissionDenied,

    #[display("{_0}")]
    InvalidConfiguration(String),

    #[display("{_0}")]
    Provider(String),

    #[display("Failed to send email. Please try again later.")]
    SendFailed,
}

#[derive(Debug, Display)]
pub enum StoreError {
    #[display("Redis connection failed: {_0}")]
    Connection(String),

    #[display("Redis operation failed: {_0}")]
    Operation(String),

    #[display("Corrupt rate limit record: {_0}")]
    Decode(String),
}

#[derive(Debug, Display)]
pub enum AssetStoreError {
    #[display("Asset store request failed: {_0}")]
    Upstream(String),
}

impl From<reqwest::Error> for AssetStoreError {
    fn from(err: reqwest::Error) -> Self {
        AssetStoreError::Upstream(err.to_string())
    }
}

/// Early exits of the contact endpoint, in checkpoint order.
#[derive(Debug, Display)]
pub enum ContactApiError {
    #[display("Method not allowed")]
    MethodNotAllowed,

    #[display("Request body too large (max 10KB)")]
    PayloadTooLarge,

    #[display("Too many requests. Please try again later.")]
    RateLimited,

    #[display("Invalid JSON in request body")]
    InvalidJson,

    #[display("{_0}")]
    Validation(ValidationError),

    #[display("{_0}")]
    EmailSend(EmailError),
}

impl From<ValidationError> for ContactApiError {
    fn from(err: ValidationError) -> Self {
        ContactApiError::Validation(err)
    }
}

impl From<EmailError> for ContactApiError {
    fn from(err: EmailError) -> Self {
        ContactApiError::EmailSend(err)
    }
}

impl ResponseError for ContactApiError {
    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        apply_cors(&mut builder);
        if matches!(self, ContactApiError::RateLimited) {
            builder.insert_header(("Retry-After", "3600"));
        }
        builder.json(serde_json::json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ContactApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ContactApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ContactApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ContactApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ContactApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactApiError::EmailSend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_response_carries_retry_after_and_cors() {
        let response = ContactApiError::RateLimited.error_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get("Retry-After").unwrap(),
            "3600"
        );
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = ContactApiError::from(ValidationError::NameTooShort);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Name must be at least 2 characters");
    }

    #[test]
    fn email_errors_map_to_internal_server_error() {
        let err = ContactApiError::from(EmailError::SendFailed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Failed to send email. Please try again later."
        );
    }
}
