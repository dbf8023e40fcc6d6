//! Classifier Gateway Input Validation
//!
//! Parses and checks `/classify_batch` request bodies before any ticket
//! reaches the classifier. Individual tickets are never rejected; only the
//! envelope is validated.

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use ticket_classifier::Ticket;
use tower_http::limit::RequestBodyLimitLayer;

/// Schema for the batch classification envelope
pub static BATCH_REQUEST_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema = json!({
        "type": "object",
        "properties": {
            "tickets": {
                "type": ["array", "null"]
            }
        }
    });

    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Invalid batch request schema")
});

/// Error response for validation failures
#[derive(Debug, serde::Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub code: u16,
    pub details: Option<Vec<String>>,
}

/// Validation error for API requests
#[derive(Debug, thiserror::Error)]
pub enum ApiValidationError {
    #[error("Invalid request format: {0}")]
    InvalidFormat(String),

    #[error("Content type must be {0}")]
    ContentType(String),

    #[error("Request payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Schema validation error: {}", .0.join("; "))]
    Schema(Vec<String>),
}

impl ApiValidationError {
    /// Convert to HTTP status code and error response
    pub fn to_response(&self) -> (StatusCode, Json<ValidationErrorResponse>) {
        let status = match self {
            Self::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            Self::ContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Schema(_) => StatusCode::BAD_REQUEST,
        };

        let details = match self {
            Self::Schema(errors) => Some(errors.clone()),
            _ => None,
        };

        (
            status,
            Json(ValidationErrorResponse {
                error: self.to_string(),
                code: status.as_u16(),
                details,
            }),
        )
    }
}

/// Validate the Content-Type header
pub fn validate_content_type(headers: &HeaderMap, expected: &str) -> Result<(), ApiValidationError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !content_type.to_ascii_lowercase().starts_with(expected) {
        return Err(ApiValidationError::ContentType(format!(
            "'{}', got '{}'",
            expected, content_type
        )));
    }

    Ok(())
}

/// Validate a parsed body against the batch envelope schema
pub fn validate_json_schema(json: &Value) -> Result<(), ApiValidationError> {
    if let Err(errors) = BATCH_REQUEST_SCHEMA.validate(json) {
        let mut details: Vec<String> = errors
            .map(|err| format!("{} at '{}'", err, err.instance_path))
            .collect();

        if details.is_empty() {
            details.push("Schema validation failed".to_string());
        }

        return Err(ApiValidationError::Schema(details));
    }

    Ok(())
}

/// Parse a raw `/classify_batch` body into tickets.
///
/// A missing or `null` `tickets` field yields an empty batch. Elements that
/// are not objects become empty tickets so the response stays one-to-one.
pub fn parse_batch_request(body: &[u8], max_bytes: usize) -> Result<Vec<Ticket>, ApiValidationError> {
    if body.len() > max_bytes {
        return Err(ApiValidationError::PayloadTooLarge(format!(
            "Request size {} exceeds maximum allowed size {}",
            body.len(),
            max_bytes
        )));
    }

    let body_str = std::str::from_utf8(body).map_err(|_| {
        ApiValidationError::InvalidFormat("Request body is not valid UTF-8".to_string())
    })?;

    let json_value: Value = serde_json::from_str(body_str.trim())
        .map_err(|e| ApiValidationError::InvalidFormat(format!("Invalid JSON: {}", e)))?;

    validate_json_schema(&json_value)?;

    let tickets = match json_value.get("tickets") {
        Some(Value::Array(items)) => items.iter().map(Ticket::from_value).collect(),
        _ => Vec::new(),
    };

    Ok(tickets)
}

/// Generate middleware config for payload limits
pub fn payload_limit_config(max_bytes: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(max_bytes)
}
