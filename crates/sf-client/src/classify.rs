//! Classification of Salesforce error bodies.
//!
//! REST endpoints answer failures with a JSON array of
//! `{"message": ..., "errorCode": ...}` objects; SOAP endpoints answer with a
//! SOAP fault. [`classify`] turns either shape into a [`ClassifiedError`] and
//! falls back to [`ClassifiedError::general_failure`] when the body is
//! neither.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Key under which the HTTP status code is recorded in [`ClassifiedError::extra`].
pub const STATUS_CODE_KEY: &str = "StatusCode";

const GENERAL_FAILURE_CODE: &str = "GENERAL_FAILURE";
const GENERAL_FAILURE_MESSAGE: &str = "general failure";

/// A remote failure normalized from a JSON or SOAP fault body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{code} - {message}")]
pub struct ClassifiedError {
    /// Salesforce error code (e.g. `MALFORMED_QUERY`, `sf:INVALID_LOGIN`).
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Additional detail; carries `StatusCode` for parsed bodies.
    pub extra: Map<String, Value>,
}

impl ClassifiedError {
    /// Create a classified error without extra detail.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Record the HTTP status code in `extra`.
    pub fn with_status(mut self, status: u16) -> Self {
        self.extra
            .insert(STATUS_CODE_KEY.to_string(), Value::from(status));
        self
    }

    /// The fixed value returned when a body cannot be parsed.
    pub fn general_failure() -> Self {
        Self::new(GENERAL_FAILURE_CODE, GENERAL_FAILURE_MESSAGE)
    }

    /// Returns true if this is the fixed general failure value.
    pub fn is_general_failure(&self) -> bool {
        *self == Self::general_failure()
    }

    /// The HTTP status code recorded in `extra`, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.extra
            .get(STATUS_CODE_KEY)
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
    }
}

/// Classify an error response body. Never fails.
pub fn classify(status: u16, body: &[u8]) -> ClassifiedError {
    if let Some(err) = parse_json_error(status, body) {
        return err;
    }

    match parse_soap_fault(body) {
        Ok(fault) => ClassifiedError::new(fault.faultcode, fault.faultstring).with_status(status),
        Err(reason) => {
            warn!(
                status,
                reason = %reason,
                body = %sanitize_error_message(&String::from_utf8_lossy(body)),
                "Unable to parse error body as JSON or SOAP fault"
            );
            ClassifiedError::general_failure()
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonError {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "errorCode")]
    error_code: String,
    #[serde(default)]
    fields: Option<Vec<String>>,
}

fn parse_json_error(status: u16, body: &[u8]) -> Option<ClassifiedError> {
    let errors: Vec<JsonError> = serde_json::from_slice(body).ok()?;
    let first = errors.into_iter().next()?;

    let mut classified = ClassifiedError::new(first.error_code, first.message).with_status(status);
    if let Some(fields) = first.fields.filter(|f| !f.is_empty()) {
        classified.extra.insert("fields".to_string(), Value::from(fields));
    }
    Some(classified)
}

#[derive(Debug, Deserialize)]
struct FaultEnvelope {
    #[serde(rename = "Body")]
    body: FaultBody,
}

#[derive(Debug, Deserialize)]
struct FaultBody {
    #[serde(rename = "Fault")]
    fault: SoapFault,
}

#[derive(Debug, Deserialize)]
struct SoapFault {
    #[serde(default)]
    faultcode: String,
    #[serde(default)]
    faultstring: String,
}

fn parse_soap_fault(body: &[u8]) -> std::result::Result<SoapFault, String> {
    let text = std::str::from_utf8(body).map_err(|e| e.to_string())?;
    if !text.trim_start().starts_with('<') {
        return Err("body is not XML".to_string());
    }
    let envelope: FaultEnvelope = quick_xml::de::from_str(text).map_err(|e| e.to_string())?;
    Ok(envelope.body.fault)
}

/// Sanitize a message before it reaches the logs.
///
/// Access tokens and `sid=` values are redacted and the result is capped at
/// 500 characters.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    // Salesforce tokens look like "<org id>!<opaque>"
    let sanitized = redact(
        r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+",
        message,
        "[REDACTED_TOKEN]",
    );
    let mut sanitized = redact(r"sid=[A-Za-z0-9]{20,}", &sanitized, "sid=[REDACTED]");

    if sanitized.len() > MAX_LENGTH {
        let cut = sanitized
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_LENGTH)
            .last()
            .unwrap_or(0);
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

fn redact(pattern: &str, input: &str, replacement: &str) -> String {
    match regex_lite::Regex::new(pattern) {
        Ok(re) => re.replace_all(input, replacement).into_owned(),
        Err(_) => input.to_string(),
    }
}
