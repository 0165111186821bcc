use once_cell::sync::Lazy;
use regex::Regex;

/// RFC-5322-inspired shape check: allowed local-part characters, a domain
/// label, and at least one dot-separated TLD label.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email regex must compile")
});

/// Validates email format. Never panics, never allocates on the happy path.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    if email.contains("..") {
        return false;
    }
    if email.matches('@').count() != 1 {
        return false;
    }
    let local_part = email.split('@').next().unwrap_or("");
    if local_part.is_empty() || local_part.len() > 64 {
        return false;
    }
    EMAIL_RE.is_match(email)
}

/// Trims, collapses each CR/LF to a single space, truncates to `max_length`
/// characters, then strips every literal `<` and `>`. Truncation happens
/// before angle-bracket stripping; that order is load-bearing.
pub fn sanitize_string(input: &str, max_length: usize) -> String {
    input
        .trim()
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .take(max_length)
        .filter(|c| *c != '<' && *c != '>')
        .collect()
}

/// Escapes `&`, `<`, `>`, `"`, `'`, `/` for interpolation into an HTML
/// fragment. Single left-to-right pass per character class: the `&` of an
/// entity introduced by a later replacement is not re-escaped.
pub fn html_encode(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('/', "&#x2F;")
}
