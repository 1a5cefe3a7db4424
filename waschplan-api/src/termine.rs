use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use waschplan_core::table::{paginate, sort_rows, SortKey, SortOrder, TerminRow};
use waschplan_core::termin::Termin;
use waschplan_core::{ids, Mieter};
use waschplan_shared::models::events::{
    TerminErfasstEvent, TerminGeloeschtEvent, TerminMarkiertEvent,
};
use waschplan_shared::PlanEvent;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminDto {
    pub id: String,
    pub partei_id: String,
    pub mieter_name: String,
    pub termin_beginn: DateTime<Utc>,
    pub termin_ende: DateTime<Utc>,
    pub marked: bool,
    pub status: waschplan_core::TerminStatus,
}

impl TerminDto {
    fn from_termin(termin: &Termin, mieter_name: &str) -> Self {
        Self {
            id: termin.id.clone(),
            partei_id: termin.partei_id.clone(),
            mieter_name: mieter_name.to_string(),
            termin_beginn: termin.termin_beginn,
            termin_ende: termin.termin_ende,
            marked: termin.is_marked(),
            status: termin.status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTerminRequest {
    pub partei_id: String,
    pub termin_beginn: DateTime<Utc>,
    /// Pseudo id of the provisionally captured client entry, if any
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTerminResponse {
    #[serde(flatten)]
    pub termin: TerminDto,
    /// Client pseudo id this booking replaces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabelleQuery {
    pub sort_key: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabelleResponse {
    pub rows: Vec<TerminRow>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/termine", get(list_termine).post(create_termin))
        .route("/v1/termine/tabelle", get(termine_tabelle))
        .route("/v1/termine/{id}/markieren", post(mark_termin))
        .route("/v1/termine/{id}/loeschen", post(delete_termin))
        .route("/v1/termine/{id}/behalten", post(keep_termin))
}

/// GET /v1/termine
/// All Termine enriched with the tenant display name
async fn list_termine(State(state): State<AppState>) -> Result<Json<Vec<TerminDto>>, AppError> {
    let termine = state
        .termin_repo
        .list_termine()
        .await
        .map_err(AppError::from_plan)?;
    let names = mieter_names(&state).await?;

    let dtos = termine
        .iter()
        .map(|t| TerminDto::from_termin(t, name_for(&names, &t.partei_id)))
        .collect();
    Ok(Json(dtos))
}

/// POST /v1/termine
/// Create a booking. The overlap check is revalidated here against the
/// server-side set; the calendar's client-side check alone is racy.
async fn create_termin(
    State(state): State<AppState>,
    Json(req): Json<CreateTerminRequest>,
) -> Result<Json<CreateTerminResponse>, AppError> {
    let mieter = state
        .mieter_repo
        .get_mieter(&req.partei_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| {
            AppError::ValidationError(format!("Unbekannte Mieterpartei: {}", req.partei_id))
        })?;

    let hour = req.termin_beginn.hour();
    if hour < state.plan_rules.slot_min_hour || hour >= state.plan_rules.slot_max_hour {
        return Err(AppError::ValidationError(format!(
            "Terminbeginn {}:00 liegt ausserhalb des Waschfensters {}:00-{}:00",
            hour, state.plan_rules.slot_min_hour, state.plan_rules.slot_max_hour
        )));
    }

    let pseudo_id = req.id.filter(|id| ids::is_pseudo(id));

    let termin = state
        .termin_repo
        .erfasse_termin(&req.partei_id, req.termin_beginn)
        .await
        .map_err(AppError::from_plan)?;

    let _ = state.events_tx.send(PlanEvent::TerminErfasst(TerminErfasstEvent {
        termin_id: termin.id.clone(),
        partei_id: termin.partei_id.clone(),
        termin_beginn: termin.termin_beginn,
        termin_ende: termin.termin_ende,
        timestamp: Utc::now().timestamp(),
    }));

    info!(termin_id = %termin.id, mieter = %mieter.name, "Termin erfasst");

    Ok(Json(CreateTerminResponse {
        termin: TerminDto::from_termin(&termin, &mieter.name),
        pseudo_id,
    }))
}

/// POST /v1/termine/{id}/markieren
/// First delete click: flag the Termin. Marking again toggles back.
async fn mark_termin(
    State(state): State<AppState>,
    Path(termin_id): Path<String>,
) -> Result<Json<TerminDto>, AppError> {
    let termin = state
        .termin_repo
        .mark_termin(&termin_id)
        .await
        .map_err(AppError::from_plan)?;
    let names = mieter_names(&state).await?;

    let _ = state.events_tx.send(PlanEvent::TerminMarkiert(TerminMarkiertEvent {
        termin_id: termin.id.clone(),
        marked: termin.is_marked(),
        timestamp: Utc::now().timestamp(),
    }));

    Ok(Json(TerminDto::from_termin(
        &termin,
        name_for(&names, &termin.partei_id),
    )))
}

/// POST /v1/termine/{id}/loeschen
/// Confirmed deletion; only valid for a marked Termin
async fn delete_termin(
    State(state): State<AppState>,
    Path(termin_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .termin_repo
        .confirm_delete(&termin_id)
        .await
        .map_err(AppError::from_plan)?;

    let _ = state.events_tx.send(PlanEvent::TerminGeloescht(TerminGeloeschtEvent {
        termin_id: termin_id.clone(),
        timestamp: Utc::now().timestamp(),
    }));

    info!(%termin_id, "Termin geloescht");
    Ok(Json(serde_json::json!({ "deleted": termin_id })))
}

/// POST /v1/termine/{id}/behalten
/// Declined confirmation: back to Active
async fn keep_termin(
    State(state): State<AppState>,
    Path(termin_id): Path<String>,
) -> Result<Json<TerminDto>, AppError> {
    let termin = state
        .termin_repo
        .decline_delete(&termin_id)
        .await
        .map_err(AppError::from_plan)?;
    let names = mieter_names(&state).await?;

    let _ = state.events_tx.send(PlanEvent::TerminMarkiert(TerminMarkiertEvent {
        termin_id: termin.id.clone(),
        marked: false,
        timestamp: Utc::now().timestamp(),
    }));

    Ok(Json(TerminDto::from_termin(
        &termin,
        name_for(&names, &termin.partei_id),
    )))
}

/// GET /v1/termine/tabelle
/// Sorted, paginated display rows. Rows are recomputed from the Termin
/// set on every request.
async fn termine_tabelle(
    State(state): State<AppState>,
    Query(query): Query<TabelleQuery>,
) -> Result<Json<TabelleResponse>, AppError> {
    let termine = state
        .termin_repo
        .list_termine()
        .await
        .map_err(AppError::from_plan)?;
    let names = mieter_names(&state).await?;

    let rows: Vec<TerminRow> = termine
        .iter()
        .map(|t| TerminRow::from_termin(t, name_for(&names, &t.partei_id)))
        .collect();
    let total = rows.len();

    let sort_key = query.sort_key.unwrap_or(SortKey::Beginn);
    let order = query.order.unwrap_or(SortOrder::Asc);
    let page = query.page.unwrap_or(0);
    let page_size = query.page_size.unwrap_or(10);

    let sorted = sort_rows(rows, order, sort_key);
    let rows = paginate(&sorted, page, page_size);

    Ok(Json(TabelleResponse {
        rows,
        total,
        page,
        page_size,
    }))
}

// ============================================================================
// Helpers
// ============================================================================

async fn mieter_names(state: &AppState) -> Result<HashMap<String, String>, AppError> {
    let mieter: Vec<Mieter> = state
        .mieter_repo
        .list_mieter()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(mieter.into_iter().map(|m| (m.id, m.name)).collect())
}

fn name_for<'a>(names: &'a HashMap<String, String>, partei_id: &str) -> &'a str {
    names.get(partei_id).map(String::as_str).unwrap_or("Unbekannt")
}
