use contracts::domain::common::{EnvelopeError, PayloadError};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Coarse classification of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Server,
    Network,
    Other,
}

/// Normalized error of every API call.
///
/// `network_error` is set when no response was received (offline, CORS,
/// timeout abort). For HTTP 422 the per-field messages of the body's `errors`
/// object land in `validation_errors`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
    pub data: Option<Value>,
    pub validation_errors: BTreeMap<String, Vec<String>>,
    pub network_error: bool,
}

impl ApiError {
    /// No response was received
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            data: None,
            validation_errors: BTreeMap::new(),
            network_error: true,
        }
    }

    /// The response arrived but could not be understood
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: format!("Invalid response: {}", message.into()),
            data: None,
            validation_errors: BTreeMap::new(),
            network_error: false,
        }
    }

    /// Build the error of a non-2xx response from its status and (JSON) body.
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let validation_errors = if status == 422 {
            body.as_ref().map(extract_validation_errors).unwrap_or_default()
        } else {
            BTreeMap::new()
        };

        let message = body
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| default_message(kind_for_status(status)).to_string());

        Self {
            status: Some(status),
            message,
            data: body,
            validation_errors,
            network_error: false,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        if self.network_error {
            return ApiErrorKind::Network;
        }
        match self.status {
            Some(status) => kind_for_status(status),
            None if !self.validation_errors.is_empty() => ApiErrorKind::Validation,
            None => ApiErrorKind::Other,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ApiErrorKind::Unauthorized
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ApiErrorKind::Validation
    }

    /// Prefix the message with the operation that failed
    pub fn context(mut self, operation: impl AsRef<str>) -> Self {
        self.message = format!("{}: {}", operation.as_ref(), self.message);
        self
    }

    /// Messages of one form field, joined
    pub fn field_error(&self, field: &str) -> Option<String> {
        self.validation_errors
            .get(field)
            .filter(|m| !m.is_empty())
            .map(|m| m.join(" "))
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(e: EnvelopeError) -> Self {
        ApiError::decode(e.to_string())
    }
}

/// Client-side validation failure, reported like a 422 without a status
impl From<PayloadError> for ApiError {
    fn from(e: PayloadError) -> Self {
        let PayloadError::MissingFields(fields) = &e;
        let validation_errors = fields
            .iter()
            .map(|f| (f.clone(), vec!["This field is required.".to_string()]))
            .collect();
        Self {
            status: None,
            message: e.to_string(),
            data: None,
            validation_errors,
            network_error: false,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

fn kind_for_status(status: u16) -> ApiErrorKind {
    match status {
        401 => ApiErrorKind::Unauthorized,
        403 => ApiErrorKind::Forbidden,
        404 => ApiErrorKind::NotFound,
        422 => ApiErrorKind::Validation,
        s if s >= 500 => ApiErrorKind::Server,
        _ => ApiErrorKind::Other,
    }
}

fn default_message(kind: ApiErrorKind) -> &'static str {
    match kind {
        ApiErrorKind::Unauthorized => "Session expired or not authorized",
        ApiErrorKind::Forbidden => "You do not have permission to perform this action",
        ApiErrorKind::NotFound => "Resource not found",
        ApiErrorKind::Validation => "The submitted data is invalid",
        ApiErrorKind::Server => "Server error, please try again later",
        ApiErrorKind::Network => "Network error, check your connection",
        ApiErrorKind::Other => "Unexpected error",
    }
}

// `message`, `error` (string) or `error.message`
fn extract_message(body: &Value) -> Option<String> {
    let candidate = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })?;
    let trimmed = candidate.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn extract_validation_errors(body: &Value) -> BTreeMap<String, Vec<String>> {
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    errors
        .iter()
        .filter_map(|(field, value)| {
            let messages: Vec<String> = match value {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => Vec::new(),
            };
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_by_status() {
        assert_eq!(ApiError::from_response(401, None).kind(), ApiErrorKind::Unauthorized);
        assert_eq!(ApiError::from_response(403, None).kind(), ApiErrorKind::Forbidden);
        assert_eq!(ApiError::from_response(404, None).kind(), ApiErrorKind::NotFound);
        assert_eq!(ApiError::from_response(422, None).kind(), ApiErrorKind::Validation);
        assert_eq!(ApiError::from_response(503, None).kind(), ApiErrorKind::Server);
        assert_eq!(ApiError::from_response(409, None).kind(), ApiErrorKind::Other);
        assert_eq!(ApiError::network("offline").kind(), ApiErrorKind::Network);
    }

    #[test]
    fn test_message_from_body() {
        let e = ApiError::from_response(400, Some(json!({"message": "Code already used"})));
        assert_eq!(e.message, "Code already used");

        let e = ApiError::from_response(500, Some(json!({"error": {"message": "boom"}})));
        assert_eq!(e.message, "boom");

        let e = ApiError::from_response(404, Some(json!({"message": ""})));
        assert_eq!(e.message, "Resource not found");
    }

    #[test]
    fn test_validation_errors() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email has already been taken.", "The email is too long."],
                "name": "The name field is required.",
                "ignored": 5
            }
        });

        let e = ApiError::from_response(422, Some(body));

        assert!(e.is_validation());
        assert_eq!(e.validation_errors.len(), 2);
        assert_eq!(e.field_error("name").as_deref(), Some("The name field is required."));
        assert_eq!(
            e.field_error("email").as_deref(),
            Some("The email has already been taken. The email is too long.")
        );
        assert!(e.data.is_some());
    }

    #[test]
    fn test_errors_object_ignored_outside_422() {
        let e = ApiError::from_response(400, Some(json!({"errors": {"name": "x"}})));
        assert!(e.validation_errors.is_empty());
    }

    #[test]
    fn test_missing_fields_become_validation_error() {
        let e: ApiError = PayloadError::MissingFields(vec!["code".into()]).into();
        assert!(e.is_validation());
        assert!(e.field_error("code").is_some());
        assert_eq!(e.status, None);
    }

    #[test]
    fn test_context() {
        let e = ApiError::from_response(500, Some(json!({"message": "db down"}))).context("Updating supplier 7");
        assert_eq!(e.to_string(), "Updating supplier 7: db down");
        assert_eq!(e.status, Some(500));
    }
}
