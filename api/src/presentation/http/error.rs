use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::validation::{CommandError, ValidationErrors};

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    pub message: String,
    /// Field name (dotted for list entries, e.g. `groups.0`) to messages
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug)]
pub enum ApiError {
    Status(StatusCode),
    Invalid(ValidationErrors),
}

impl From<StatusCode> for ApiError {
    fn from(code: StatusCode) -> Self {
        ApiError::Status(code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Status(code) => code.into_response(),
            ApiError::Invalid(errors) => {
                let body = ValidationErrorBody {
                    message: "The given data was invalid.".into(),
                    errors: errors.into_fields(),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

/// Maps a command failure; storage errors are logged under `event` and
/// answered with a bare 500.
pub fn command_failed(err: CommandError, event: &'static str) -> ApiError {
    match err {
        CommandError::Validation(errors) => ApiError::Invalid(errors),
        CommandError::Storage(e) => {
            tracing::error!(error = ?e, event, "command_failed");
            ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn storage_failed(err: anyhow::Error, event: &'static str) -> ApiError {
    tracing::error!(error = ?err, event, "query_failed");
    ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_unprocessable() {
        let mut errors = ValidationErrors::new();
        errors.add("link", "The link field is required.");
        let resp = command_failed(CommandError::Validation(errors), "create_link").into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn storage_maps_to_internal_error() {
        let err = CommandError::Storage(anyhow::anyhow!("connection reset"));
        let resp = command_failed(err, "create_link").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = storage_failed(anyhow::anyhow!("boom"), "list_links").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
