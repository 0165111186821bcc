use actix_web::{
    http::{header::CONTENT_LENGTH, Method},
    web, HttpRequest, HttpResponse,
};

use crate::{
    errors::{apply_cors, ContactApiError},
    limiter::rate_limiter::{check_rate_limit, RATE_LIMIT_MAX_REQUESTS},
    entities::rate_limit::RateLimitDecision,
    use_cases::{contact::validate_contact_form, extractors::ClientIp},
    AppState,
};

const MAX_REQUEST_SIZE: u64 = 10240;

/// Contact endpoint, bound to every method of `/api/contact`. A linear
/// sequence of checkpoints, each a possible early exit; the error type
/// carries the response shaping (status, body, CORS) for every exit.
pub async fn contact_endpoint(
    req: HttpRequest,
    body: web::Bytes,
    client_ip: ClientIp,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ContactApiError> {
    if req.method() == Method::OPTIONS {
        let mut builder = HttpResponse::NoContent();
        apply_cors(&mut builder);
        return Ok(builder.finish());
    }

    if req.method() != Method::POST {
        return Err(ContactApiError::MethodNotAllowed);
    }

    // Size gate applies only when the client declares a length; an absent
    // header skips the check.
    if let Some(declared) = declared_content_length(&req) {
        if declared > MAX_REQUEST_SIZE {
            return Err(ContactApiError::PayloadTooLarge);
        }
    }

    let bypass_rate_limit = bypass_granted(
        &req,
        "X-Bypass-Rate-Limit",
        state.config.rate_limit_bypass_secret.as_deref(),
    );
    let bypass_email = bypass_granted(
        &req,
        "X-Bypass-Email",
        state.config.email_bypass_secret.as_deref(),
    );

    let rate_limit = if bypass_rate_limit {
        RateLimitDecision {
            allowed: true,
            remaining: RATE_LIMIT_MAX_REQUESTS,
        }
    } else {
        check_rate_limit(&client_ip.0, state.rate_limit_store.as_deref()).await
    };
    if !rate_limit.allowed {
        return Err(ContactApiError::RateLimited);
    }

    let parsed: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| ContactApiError::InvalidJson)?;

    let contact = validate_contact_form(&parsed)?;

    if !bypass_email {
        state.mailer.send(&contact).await?;
    }

    let mut builder = HttpResponse::Ok();
    apply_cors(&mut builder);
    builder.insert_header(("X-RateLimit-Remaining", rate_limit.remaining.to_string()));
    Ok(builder.json(serde_json::json!({
        "success": true,
        "message": "Message sent successfully"
    })))
}

fn declared_content_length(req: &HttpRequest) -> Option<u64> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// A bypass header is honored only when the matching server-side secret is
/// configured, non-empty, and equal to the header value.
fn bypass_granted(req: &HttpRequest, header: &str, secret: Option<&str>) -> bool {
    match secret {
        Some(secret) if !secret.is_empty() => req
            .headers()
            .get(header)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == secret),
        _ => false,
    }
}
