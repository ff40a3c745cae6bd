//! End-to-end API tests over a running server.
//!
//! Each test boots the router with the seeded in-memory store on an
//! ephemeral port and drives it through reqwest, the same way an HTTP
//! client would.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use turnero::AppState;
use turnero::api::routes::create_router;
use turnero::config::{Settings, StorageBackend};
use turnero::repositories::{MemoryStore, Repositories};
use turnero::services::Services;

/// Boots a fresh app on an ephemeral port and returns its base URL.
async fn spawn_app() -> String {
    let mut settings = Settings::default();
    settings.storage.backend = StorageBackend::Memory;

    let repos = Repositories::memory(Arc::new(MemoryStore::seeded()));
    let state = AppState::new(Services::new(repos), None, Arc::new(settings));
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn turn_payload(date_ms: i64, service: i32, barber: i32, client: i32) -> Value {
    json!({
        "date": date_ms,
        "idService": service,
        "idBarber": barber,
        "idClient": client,
    })
}

fn future_ms(days: i64) -> i64 {
    (Utc::now() + Duration::days(days)).timestamp_millis()
}

fn past_ms() -> i64 {
    Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0)
        .unwrap()
        .timestamp_millis()
}

async fn post_turn(client: &reqwest::Client, base: &str, payload: &Value) -> reqwest::Response {
    client
        .post(format!("{}/api/turns", base))
        .json(payload)
        .send()
        .await
        .unwrap()
}

async fn list_turns(client: &reqwest::Client, base: &str) -> Vec<Value> {
    let body: Value = client
        .get(format!("{}/api/turns", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["turns"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_create_then_list_and_get_expands_associations() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let date_ms = Utc
        .with_ymd_and_hms(2030, 5, 1, 10, 0, 0)
        .unwrap()
        .timestamp_millis();
    let resp = post_turn(&client, &base, &turn_payload(date_ms, 1, 2, 1)).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn created");

    let turns = list_turns(&client, &base).await;
    assert_eq!(turns.len(), 1);

    let turn = &turns[0];
    assert_eq!(turn["date"], "2030-05-01T10:00:00.000Z");
    assert_eq!(turn["service"]["name"], "Corte clásico");
    assert_eq!(turn["service"]["price"], "1500");
    assert_eq!(turn["service"]["duration_minutes"], 30);
    assert_eq!(turn["barber"]["name"], "Lucas Pereyra");
    assert_eq!(turn["client"]["email"], "juan.perez@example.com");
    // Foreign keys are replaced by the expanded associations.
    assert!(turn.get("idService").is_none());
    assert!(turn.get("service_id").is_none());

    let id = turn["id"].as_i64().unwrap();
    let body: Value = client
        .get(format!("{}/api/turns/{}", base, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["turn"]["id"].as_i64().unwrap(), id);
    assert_eq!(body["turn"]["client"]["name"], "Juan Pérez");
}

#[tokio::test]
async fn test_list_starts_empty() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/turns", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "turns": [] }));
}

#[tokio::test]
async fn test_create_rejects_past_and_present_dates() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = post_turn(&client, &base, &turn_payload(past_ms(), 1, 1, 1)).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "The date must be today or a future date");
    assert_eq!(body["code"], "INVALID_DATE");

    // The current instant has already passed by the time it is checked.
    let now = Utc::now().timestamp_millis();
    let resp = post_turn(&client, &base, &turn_payload(now, 1, 1, 1)).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "The date must be today or a future date");

    assert!(list_turns(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_unknown_catalog_references() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = post_turn(&client, &base, &turn_payload(future_ms(1), 99, 1, 1)).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Service not found");
    assert_eq!(body["code"], "SERVICE_NOT_FOUND");

    let resp = post_turn(&client, &base, &turn_payload(future_ms(1), 1, 99, 1)).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Barber not found");

    let resp = post_turn(&client, &base, &turn_payload(future_ms(1), 1, 1, 99)).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Client not found");
}

#[tokio::test]
async fn test_date_check_runs_before_catalog_checks() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    // Past date and unknown service: the date failure is reported.
    let resp = post_turn(&client, &base, &turn_payload(past_ms(), 99, 99, 99)).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "The date must be today or a future date");
}

#[tokio::test]
async fn test_create_rejects_occupied_date() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let slot = future_ms(1);

    let resp = post_turn(&client, &base, &turn_payload(slot, 1, 1, 1)).await;
    assert_eq!(resp.status(), 200);

    let resp = post_turn(&client, &base, &turn_payload(slot, 2, 2, 2)).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "There is a turn in the same date");
    assert_eq!(body["code"], "DATE_CONFLICT");

    assert_eq!(list_turns(&client, &base).await.len(), 1);
}

#[tokio::test]
async fn test_update_frees_slot_for_new_booking() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let slot = future_ms(1);

    // Book the slot, then fail to double-book it.
    let resp = post_turn(&client, &base, &turn_payload(slot, 1, 1, 1)).await;
    assert_eq!(resp.status(), 200);
    let resp = post_turn(&client, &base, &turn_payload(slot, 2, 2, 2)).await;
    assert_eq!(resp.status(), 400);

    // Move the original booking to another slot.
    let id = list_turns(&client, &base).await[0]["id"].as_i64().unwrap();
    let resp = client
        .put(format!("{}/api/turns/{}", base, id))
        .json(&turn_payload(future_ms(2), 1, 1, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn updated");

    // The freed slot accepts a new booking.
    let resp = post_turn(&client, &base, &turn_payload(slot, 2, 2, 2)).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn created");

    assert_eq!(list_turns(&client, &base).await.len(), 2);
}

#[tokio::test]
async fn test_update_keeping_own_date_is_not_a_conflict() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let slot = future_ms(1);

    post_turn(&client, &base, &turn_payload(slot, 1, 1, 1)).await;
    let id = list_turns(&client, &base).await[0]["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{}/api/turns/{}", base, id))
        .json(&turn_payload(slot, 2, 2, 2))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let turns = list_turns(&client, &base).await;
    assert_eq!(turns[0]["service"]["name"], "Corte y barba");
    assert_eq!(turns[0]["barber"]["name"], "Lucas Pereyra");
}

#[tokio::test]
async fn test_missing_turn_is_bad_request_not_404() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/turns/999", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn not found");
    assert_eq!(body["code"], "TURN_NOT_FOUND");

    let resp = client
        .put(format!("{}/api/turns/999", base))
        .json(&turn_payload(future_ms(1), 1, 1, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn not found");

    let resp = client
        .delete(format!("{}/api/turns/999", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn not found");
}

#[tokio::test]
async fn test_update_missing_turn_reported_before_bad_date() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    // Past date on a missing turn: the turn-exists check wins.
    let resp = client
        .put(format!("{}/api/turns/999", base))
        .json(&turn_payload(past_ms(), 1, 1, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn not found");
}

#[tokio::test]
async fn test_delete_turn_flow() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    post_turn(&client, &base, &turn_payload(future_ms(1), 1, 1, 1)).await;
    let id = list_turns(&client, &base).await[0]["id"].as_i64().unwrap();

    let resp = client
        .delete(format!("{}/api/turns/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Turn deleted");

    let resp = client
        .get(format!("{}/api/turns/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    assert!(list_turns(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    // Missing idClient
    let resp = post_turn(
        &client,
        &base,
        &json!({ "date": future_ms(1), "idService": 1, "idBarber": 1 }),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    // Non-numeric date
    let resp = post_turn(
        &client,
        &base,
        &json!({ "date": "tomorrow", "idService": 1, "idBarber": 1, "idClient": 1 }),
    )
    .await;
    assert_eq!(resp.status(), 400);

    assert!(list_turns(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_non_positive_id_fails_field_validation() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = post_turn(&client, &base, &turn_payload(future_ms(1), 0, 1, 1)).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let fields = body["details"]["fields"].as_array().unwrap();
    assert!(
        fields
            .iter()
            .any(|f| f["field"] == "id_service" && f["message"].as_str().unwrap().contains("positive"))
    );
}

#[tokio::test]
async fn test_health_endpoint_reports_memory_store() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["name"], "turnero");
    assert_eq!(body["checks"]["storage"]["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["message"], "in-memory store");
}

#[tokio::test]
async fn test_request_id_echoed_and_generated() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/turns", base))
        .header("x-request-id", "test-id-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "test-id-123");

    let resp = client
        .get(format!("{}/api/turns", base))
        .send()
        .await
        .unwrap();
    let generated = resp.headers()["x-request-id"].to_str().unwrap();
    assert!(!generated.is_empty());
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/unknown", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Resource not found");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/docs/openapi.json", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["paths"]["/api/turns"].is_object());
    assert!(body["paths"]["/api/turns/{id}"].is_object());
}
