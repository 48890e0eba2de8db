use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::todo_service::TodoError;
use crate::application::validation::ValidationErrors;

/// Problem-details body returned for every 4xx.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl ApiError {
    pub fn invalid_id() -> Self {
        Self {
            title: "Invalid id".into(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            detail: Some("The provided id is not a valid UUID.".into()),
            errors: None,
        }
    }

    pub fn not_found() -> Self {
        Self { title: "Not Found".into(), status: StatusCode::NOT_FOUND.as_u16(), detail: None, errors: None }
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            title: "One or more validation errors occurred.".into(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            detail: None,
            errors: serde_json::to_value(errors).ok(),
        }
    }

    /// Body or query string that could not be bound to the request type.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            title: "One or more validation errors occurred.".into(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            detail: Some(detail.into()),
            errors: None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self { Self::malformed(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self { Self::malformed(rejection.body_text()) }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(errors) => Self::validation(&errors),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_REQUEST);
        (status, [(::http::header::CONTENT_TYPE, "application/problem+json")], Json(self)).into_response()
    }
}
