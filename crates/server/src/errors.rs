use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::errors::ServiceError;
use tracing::error;

/// Error response rendered as `{"message": ...}`.
///
/// `message` is usually a string; argument errors carry an object mapping the
/// offending field to its help text.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<Value>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Argument { field, message } => {
                JsonApiError::new(StatusCode::BAD_REQUEST, json!({ field: message }))
            }
            ServiceError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, msg),
            ServiceError::Db(msg) => {
                error!(error = %msg, "storage failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_service_errors_to_statuses() {
        let cases = [
            (ServiceError::Argument { field: "likes", message: "Number of likes is required".into() }, StatusCode::BAD_REQUEST),
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("video"), StatusCode::NOT_FOUND),
            (ServiceError::conflict("video"), StatusCode::CONFLICT),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (e, status) in cases {
            assert_eq!(JsonApiError::from(e).status, status);
        }
    }

    #[test]
    fn argument_errors_name_the_field() {
        let e = JsonApiError::from(ServiceError::Argument { field: "likes", message: "Number of likes is required".into() });
        assert_eq!(e.message, json!({"likes": "Number of likes is required"}));
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let e = JsonApiError::from(ServiceError::Db("no such table: video".into()));
        assert_eq!(e.message, json!("Internal Server Error"));
    }
}
