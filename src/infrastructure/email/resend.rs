use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::{
    entities::contact::SanitizedContact,
    errors::EmailError,
    settings::AppConfig,
    utils::sanitize::html_encode,
};

const SUBJECT_NAME_MAX: usize = 100;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, contact: &SanitizedContact) -> Result<(), EmailError>;
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    #[serde(rename = "replyTo")]
    reply_to: &'a str,
    subject: String,
    html: String,
    text: String,
}

/// Relays a sanitized contact submission to the Resend send endpoint.
/// One POST per submission; the first failure is terminal for the request.
pub struct ResendMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    to_email: String,
    from_email: String,
}

impl ResendMailer {
    pub fn new(http: reqwest::Client, config: &AppConfig) -> Self {
        ResendMailer {
            http,
            api_url: config.resend_api_url.clone(),
            api_key: config.resend_api_key.clone(),
            to_email: config.contact_email.clone(),
            from_email: config.from_email.clone(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send(&self, contact: &SanitizedContact) -> Result<(), EmailError> {
        let request = SendEmailRequest {
            from: &self.from_email,
            to: [&self.to_email],
            reply_to: &contact.email,
            subject: build_subject(contact),
            html: build_html_body(contact),
            text: build_text_body(contact),
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Email sending error: {}", e);
                EmailError::SendFailed
            })?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or_else(|_| Value::Object(Default::default()));

        if status.is_success() {
            tracing::info!("Email sent successfully: {}", body);
            return Ok(());
        }

        tracing::error!("Resend API error: status={} body={}", status, body);

        let provider_message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Err(match status.as_u16() {
            401 => EmailError::AuthenticationFailed,
            403 => EmailError::PermissionDenied,
            422 => EmailError::InvalidConfiguration(provider_message.unwrap_or_else(|| {
                "Invalid email configuration. Check domain verification.".to_string()
            })),
            _ => match provider_message {
                Some(message) => EmailError::Provider(message),
                None => EmailError::SendFailed,
            },
        })
    }
}

fn build_subject(contact: &SanitizedContact) -> String {
    let name: String = contact.name.chars().take(SUBJECT_NAME_MAX).collect();
    format!("New Contact Form Submission from {name}")
}

/// Fields are entity-encoded even though the sanitizer already stripped
/// angle brackets; both layers are kept.
fn build_html_body(contact: &SanitizedContact) -> String {
    format!(
        "<h2>New Contact Form Submission</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{}</p>",
        html_encode(&contact.name),
        html_encode(&contact.email),
        html_encode(&contact.message).replace('\n', "<br>"),
    )
}

fn build_text_body(contact: &SanitizedContact) -> String {
    format!(
        "New Contact Form Submission\n\nName: {}\nEmail: {}\n\nMessage:\n{}",
        contact.name, contact.email, contact.message,
    )
}
