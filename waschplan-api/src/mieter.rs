use axum::{extract::State, routing::get, Json, Router};

use waschplan_core::Mieter;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/mieter", get(list_mieter))
}

/// GET /v1/mieter
/// The tenant parties of the house, with their avatar assets
async fn list_mieter(State(state): State<AppState>) -> Result<Json<Vec<Mieter>>, AppError> {
    let mieter = state
        .mieter_repo
        .list_mieter()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(mieter))
}
