//! Normalization of Salesforce error responses.
//!
//! A failed call can answer with three shapes of body:
//!
//! 1. the REST error envelope, a JSON array of `{message, errorCode, fields}`
//! 2. a SOAP fault with `faultcode` / `faultstring` under `Body/Fault`
//! 3. anything else (HTML error pages, proxies, plain text)
//!
//! [`classify`] tries them in that order and keeps the HTTP status in every
//! case. It performs no I/O and has no state.

use std::sync::LazyLock;

use serde::Deserialize;

use crate::xml::XmlDocument;

/// A non-2xx response normalized into one shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP {status}: {message}{}", code_suffix(.error_code))]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Machine-readable code (`errorCode` or `faultcode`) when one was present.
    pub error_code: Option<String>,
    /// Human-readable message of the first entry; the verbatim body when
    /// nothing could be parsed. The `Display` form combines it with the code.
    pub message: String,
    /// Fields named by the REST error envelope.
    pub fields: Vec<String>,
    /// The raw response body, including every entry after the first.
    pub body: String,
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" (error code: {})", c))
        .unwrap_or_default()
}

impl ApiError {
    /// Returns true for 401 responses (expired or revoked session).
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Returns true for 404 responses.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

#[derive(Debug, Deserialize)]
struct RestErrorEntry {
    #[serde(default)]
    message: String,
    #[serde(rename = "errorCode")]
    error_code: Option<String>,
    #[serde(default)]
    fields: Vec<String>,
}

/// Classify an error response body. First match wins.
pub fn classify(status: u16, body: &[u8]) -> ApiError {
    if let Some(err) = from_rest_envelope(status, body) {
        return err;
    }

    let text = String::from_utf8_lossy(body);
    if let Some(err) = from_soap_fault(status, &text) {
        return err;
    }

    ApiError {
        status,
        error_code: None,
        message: text.to_string(),
        fields: Vec::new(),
        body: text.into_owned(),
    }
}

fn from_rest_envelope(status: u16, body: &[u8]) -> Option<ApiError> {
    let entries: Vec<RestErrorEntry> = serde_json::from_slice(body).ok()?;
    let first = entries.into_iter().next()?;

    Some(ApiError {
        status,
        error_code: first.error_code.filter(|c| !c.is_empty()),
        message: first.message,
        fields: first.fields,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

fn from_soap_fault(status: u16, body: &str) -> Option<ApiError> {
    let doc = XmlDocument::parse(body).ok()?;
    let code = doc.text_at(&["Body", "Fault", "faultcode"]);
    let message = doc.text_at(&["Body", "Fault", "faultstring"]);
    if code.is_none() && message.is_none() {
        return None;
    }

    Some(ApiError {
        status,
        error_code: code.filter(|c| !c.is_empty()).map(str::to_string),
        message: message.unwrap_or_default().to_string(),
        fields: Vec::new(),
        body: body.to_string(),
    })
}

static TOKEN_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}![A-Za-z0-9_.]+").expect("static pattern")
});

static SESSION_PATTERN: LazyLock<regex_lite::Regex> =
    LazyLock::new(|| regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").expect("static pattern"));

/// Redact session ids and bound the length of a body before it is logged.
///
/// Only used for log lines; [`ApiError::message`] keeps the original text.
pub(crate) fn sanitize_for_log(body: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let redacted = TOKEN_PATTERN.replace_all(body, "[REDACTED_TOKEN]");
    let mut sanitized = SESSION_PATTERN
        .replace_all(&redacted, "sid=[REDACTED]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
