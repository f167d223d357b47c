use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use service::errors::{ErrorKind, ServiceError};

/// Body of every error response: `{"status", "message", "error"?}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    message: &'static str,
    error: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: &'static str, error: Option<String>) -> Self {
        Self { status, message, error }
    }

    pub fn bad_request(error: impl ToString) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "The request is invalid in some way.",
            Some(error.to_string()),
        )
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error.", None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let (status, message) = match e.kind() {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "Validation error."),
            ErrorKind::AlreadyExists => (StatusCode::CONFLICT, "Conflict."),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "Password Card not found."),
            ErrorKind::Internal => return Self::internal(),
        };
        Self::new(status, message, Some(detail(&e)))
    }
}

// The underlying cause, without the service's context prefix.
fn detail(e: &ServiceError) -> String {
    match e {
        ServiceError::Validation(inner) => inner.to_string(),
        ServiceError::Store { source, .. } => source.to_string(),
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            message: self.message.to_string(),
            error: self.error,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::errors::StoreError;

    #[test]
    fn service_errors_map_to_statuses() {
        let url = "https://aws.com/login";
        let conflict = JsonApiError::from(ServiceError::store("ctx", StoreError::url_exists(url)));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            conflict.error.as_deref(),
            Some(r#"password with URL "https://aws.com/login" already exists"#)
        );

        let missing = JsonApiError::from(ServiceError::store("ctx", StoreError::not_found("c3")));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let model_err = models::errors::ModelError::Validation("invalid name".into());
        let invalid = JsonApiError::from(ServiceError::Validation(model_err));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error.as_deref(), Some("invalid name"));

        let internal = JsonApiError::from(ServiceError::store("ctx", StoreError::Poisoned));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.error, None);
    }

    #[test]
    fn error_field_is_omitted_when_absent() {
        let body = ErrorBody {
            status: 500,
            message: "Internal Server Error.".into(),
            error: None,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"status": 500, "message": "Internal Server Error."})
        );
    }
}
