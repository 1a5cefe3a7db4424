use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterDeviceResponse {
    pub registered: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/devices/register", post(register_device))
}

/// POST /v1/devices/register
/// Device-token registration, posted once at client startup.
/// Re-registering the same token is a no-op.
async fn register_device(
    State(state): State<AppState>,
    Json(req): Json<RegisterDeviceRequest>,
) -> Result<Json<RegisterDeviceResponse>, AppError> {
    if req.token.trim().is_empty() {
        return Err(AppError::ValidationError("Empty device token".to_string()));
    }

    let registered = state
        .device_repo
        .register_device(&req.token)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(RegisterDeviceResponse { registered }))
}
