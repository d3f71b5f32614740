use axum::extract::multipart::MultipartError;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hr::error::HrError;
use log::{error, warn};
use serde_json::json;

/// Failure of a request handler.
///
/// Validation errors become 400 with the field messages, missing records 404, and anything else
/// a logged 500 carrying only a generic message.
#[derive(Debug)]
pub(crate) enum ApiError {
    Hr {
        source: HrError,
        action: &'static str,
    },
    /// A request body that could not be read as a form
    Form(String),
}

impl From<HrError> for ApiError {
    fn from(source: HrError) -> Self {
        ApiError::Hr {
            source,
            action: "processing the request",
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Form(err.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Form(rejection.body_text())
    }
}

/// Names the action a storage failure is reported against, e.g. "creating employee".
pub(crate) trait During<T> {
    fn during(self, action: &'static str) -> Result<T, ApiError>;
}

impl<T> During<T> for Result<T, HrError> {
    fn during(self, action: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::Hr { source, action })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Hr {
                source: HrError::Validation(errors),
                ..
            } => (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response(),
            ApiError::Hr {
                source: HrError::NotFound { entity, .. },
                ..
            } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{entity} not found") })),
            )
                .into_response(),
            ApiError::Hr { source, action } => {
                error!("Server error {action}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "errors": { "server": [format!("Server error {action}.")] } })),
                )
                    .into_response()
            }
            ApiError::Form(reason) => {
                warn!("Rejected form: {reason}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "errors": { "form": [reason] } })),
                )
                    .into_response()
            }
        }
    }
}
