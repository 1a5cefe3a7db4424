use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use waschplan_api::{app, AppState};
use waschplan_store::app_config::PlanRules;
use waschplan_store::{InMemoryDeviceRepo, InMemoryMieterRepo, InMemoryTerminRepo};

fn test_app() -> Router {
    let (events_tx, _) = tokio::sync::broadcast::channel(100);

    app(AppState {
        termin_repo: Arc::new(InMemoryTerminRepo::new(9)),
        mieter_repo: Arc::new(InMemoryMieterRepo::with_default_haus()),
        device_repo: Arc::new(InMemoryDeviceRepo::new()),
        events_tx,
        plan_rules: PlanRules {
            termin_dauer_stunden: 9,
            slot_min_hour: 7,
            slot_max_hour: 22,
        },
    })
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_termin(app: &Router, partei_id: &str, beginn: &str) -> (StatusCode, Value) {
    send_json(
        app,
        Method::POST,
        "/v1/termine",
        Some(json!({ "parteiId": partei_id, "terminBeginn": beginn })),
    )
    .await
}

#[tokio::test]
async fn test_create_and_list_termine() {
    let app = test_app();

    let (status, created) = create_termin(&app, "mieter-1", "2024-01-01T08:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["parteiId"], "mieter-1");
    assert_eq!(created["mieterName"], "Hugo");
    assert_eq!(created["marked"], false);
    // Nine-hour wash day
    assert_eq!(created["terminEnde"], "2024-01-01T17:00:00Z");

    let (status, listed) = send_json(&app, Method::GET, "/v1/termine", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["mieterName"], "Hugo");
}

#[tokio::test]
async fn test_overlapping_termin_is_rejected() {
    let app = test_app();

    let (status, _) = create_termin(&app, "mieter-1", "2024-01-01T08:00:00Z").await;
    assert_eq!(status, StatusCode::OK);

    // 09:00 lies inside the closed interval [08:00, 17:00]
    let (status, body) = create_termin(&app, "mieter-2", "2024-01-01T09:00:00Z").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("bereits gebucht"));

    // Only the first booking survives
    let (_, listed) = send_json(&app, Method::GET, "/v1/termine", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_boundary_start_counts_as_booked() {
    let app = test_app();
    create_termin(&app, "mieter-1", "2024-01-01T08:00:00Z").await;

    let (status, _) = create_termin(&app, "mieter-2", "2024-01-01T17:00:00Z").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = create_termin(&app, "mieter-2", "2024-01-02T08:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_two_step_deletion() {
    let app = test_app();
    let (_, created) = create_termin(&app, "mieter-1", "2024-01-01T08:00:00Z").await;
    let id = created["id"].as_str().unwrap().to_string();

    // Deleting an unmarked Termin is refused
    let (status, _) = send_json(&app, Method::POST, &format!("/v1/termine/{}/loeschen", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Mark, then confirm
    let (status, marked) = send_json(&app, Method::POST, &format!("/v1/termine/{}/markieren", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["marked"], true);

    let (status, _) = send_json(&app, Method::POST, &format!("/v1/termine/{}/loeschen", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send_json(&app, Method::GET, "/v1/termine", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_declining_confirmation_keeps_termin_active() {
    let app = test_app();
    let (_, created) = create_termin(&app, "mieter-1", "2024-01-01T08:00:00Z").await;
    let id = created["id"].as_str().unwrap().to_string();

    send_json(&app, Method::POST, &format!("/v1/termine/{}/markieren", id), None).await;

    let (status, kept) = send_json(&app, Method::POST, &format!("/v1/termine/{}/behalten", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept["marked"], false);
    assert_eq!(kept["status"], "ACTIVE");

    let (_, listed) = send_json(&app, Method::GET, "/v1/termine", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_mieter_is_rejected() {
    let app = test_app();
    let (status, body) = create_termin(&app, "no-such-mieter", "2024-01-01T08:00:00Z").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no-such-mieter"));
}

#[tokio::test]
async fn test_start_outside_wash_window_is_rejected() {
    let app = test_app();
    let (status, _) = create_termin(&app, "mieter-1", "2024-01-01T05:00:00Z").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = create_termin(&app, "mieter-1", "2024-01-01T23:00:00Z").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tabelle_sorting_and_pagination() {
    let app = test_app();
    create_termin(&app, "mieter-1", "2024-01-03T08:00:00Z").await;
    create_termin(&app, "mieter-4", "2024-01-01T08:00:00Z").await;
    create_termin(&app, "mieter-2", "2024-01-02T08:00:00Z").await;

    // Default sort: by beginn ascending
    let (status, body) = send_json(&app, Method::GET, "/v1/termine/tabelle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows[0]["beginn"], "01.01.2024 08:00");
    assert_eq!(rows[1]["beginn"], "02.01.2024 08:00");
    assert_eq!(rows[2]["beginn"], "03.01.2024 08:00");

    // Descending by tenant name
    let (_, body) = send_json(
        &app,
        Method::GET,
        "/v1/termine/tabelle?sortKey=mieterName&order=desc",
        None,
    )
    .await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows[0]["mieterName"], "Hugo");
    assert_eq!(rows[2]["mieterName"], "Beat & Lisa");

    // Page 1 with page size 2 holds the single remaining row
    let (_, body) = send_json(&app, Method::GET, "/v1/termine/tabelle?page=1&pageSize=2", None).await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["beginn"], "03.01.2024 08:00");
}

#[tokio::test]
async fn test_device_registration_is_idempotent() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/v1/devices/register",
        Some(json!({ "token": "device-token-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], true);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/v1/devices/register",
        Some(json!({ "token": "device-token-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], false);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/v1/devices/register",
        Some(json!({ "token": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mutations_publish_plan_events() {
    let (events_tx, mut events_rx) = tokio::sync::broadcast::channel(100);

    let app = app(AppState {
        termin_repo: Arc::new(InMemoryTerminRepo::new(9)),
        mieter_repo: Arc::new(InMemoryMieterRepo::with_default_haus()),
        device_repo: Arc::new(InMemoryDeviceRepo::new()),
        events_tx,
        plan_rules: PlanRules {
            termin_dauer_stunden: 9,
            slot_min_hour: 7,
            slot_max_hour: 22,
        },
    });

    let (_, created) = create_termin(&app, "mieter-1", "2024-01-01T08:00:00Z").await;
    let id = created["id"].as_str().unwrap().to_string();
    send_json(&app, Method::POST, &format!("/v1/termine/{}/markieren", id), None).await;
    send_json(&app, Method::POST, &format!("/v1/termine/{}/loeschen", id), None).await;

    let event = events_rx.recv().await.unwrap();
    assert!(matches!(event, waschplan_shared::PlanEvent::TerminErfasst(_)));
    let event = events_rx.recv().await.unwrap();
    assert!(matches!(event, waschplan_shared::PlanEvent::TerminMarkiert(_)));
    let event = events_rx.recv().await.unwrap();
    assert!(matches!(event, waschplan_shared::PlanEvent::TerminGeloescht(_)));
}
