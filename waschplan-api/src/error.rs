use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use waschplan_core::plan::PlanError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// Map domain lifecycle errors onto HTTP semantics. Overlaps and
    /// refused transitions surface as 409 with the inline message the
    /// calendar shows.
    pub fn from_plan(err: PlanError) -> Self {
        match err {
            PlanError::SlotBelegt(_) => AppError::ConflictError(err.to_string()),
            PlanError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            PlanError::InvalidTransition { .. } => AppError::ConflictError(err.to_string()),
            PlanError::NoPendingSlot => AppError::ValidationError(err.to_string()),
            PlanError::NotPseudo(_) => AppError::ValidationError(err.to_string()),
            PlanError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
