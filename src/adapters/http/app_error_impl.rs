use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app_error::{AppError, ErrorCode};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Errors are terminal here: logged, converted to a response, never
        // re-thrown.
        tracing::error!(error = ?self, "Request failed");

        match self {
            AppError::NotLoggedIn => error_resp(
                StatusCode::UNAUTHORIZED,
                ErrorCode::NotLoggedIn,
                Some("You must be logged in to manage members".into()),
            ),
            AppError::NoActiveOrganization => error_resp(
                StatusCode::BAD_REQUEST,
                ErrorCode::NoActiveOrganization,
                Some("No active organization selected".into()),
            ),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, Some(msg))
            }
            AppError::PlanRequired(msg) => {
                error_resp(StatusCode::FORBIDDEN, ErrorCode::PlanRequired, Some(msg))
            }
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, ErrorCode::NotFound, None),
            AppError::Remote(msg) => {
                error_resp(StatusCode::BAD_GATEWAY, ErrorCode::RemoteError, Some(msg))
            }
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                None,
            ),
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
