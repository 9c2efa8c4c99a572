use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::domain::{Segment, Stage};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

#[derive(Clone)]
struct MockService {
    status: StatusCode,
    response: Value,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockService {
    fn replying(status: StatusCode, response: Value) -> Self {
        Self {
            status,
            response,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn capture(
    State(service): State<MockService>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    service.received.lock().await.push(body);
    (service.status, Json(service.response.clone()))
}

/// Serves `/leads` and `/broadcasts` on an ephemeral port and returns the base URL.
async fn spawn_mock_service(service: MockService) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/leads", post(capture))
        .route("/broadcasts", post(capture))
        .with_state(service);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn api_for(base: &str) -> HttpCrmApi {
    HttpCrmApi::new(&format!("{base}/leads"), &format!("{base}/broadcasts")).expect("api")
}

fn lead_request() -> CreateLeadRequest {
    CreateLeadRequest {
        name: "Maria".into(),
        username: None,
        telegram_id: None,
        stage: Stage::Contact,
        value: 35_000.0,
        notes: "Asked for a demo".into(),
    }
}

#[test]
fn rejects_malformed_endpoint() {
    assert!(HttpCrmApi::new("not a url", "http://127.0.0.1/broadcasts").is_err());
}

#[tokio::test]
async fn create_lead_posts_json_and_reads_assigned_id() {
    let service = MockService::replying(
        StatusCode::CREATED,
        json!({ "id": 41, "name": "Maria", "last_contact": "2024-05-10 09:30:00.123456" }),
    );
    let received = service.received.clone();
    let base = spawn_mock_service(service).await.expect("server");

    let created = api_for(&base)
        .create_lead(&lead_request())
        .await
        .expect("create");
    assert_eq!(created.id.0, 41);
    assert_eq!(
        created.last_contact.as_deref(),
        Some("2024-05-10 09:30:00.123456")
    );

    let bodies = received.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["name"], "Maria");
    assert_eq!(bodies[0]["stage"], "contact");
    assert!(bodies[0]["telegram_id"].is_null());
    assert!(bodies[0]["username"].is_null());
}

#[tokio::test]
async fn non_success_status_is_request_failure() {
    let service = MockService::replying(
        StatusCode::BAD_REQUEST,
        json!({ "error": "Missing required field: name" }),
    );
    let base = spawn_mock_service(service).await.expect("server");

    let err = api_for(&base)
        .create_lead(&lead_request())
        .await
        .expect_err("must fail");
    assert!(matches!(err, CrmError::RequestFailure(_)));
}

#[tokio::test]
async fn lead_response_without_id_is_request_failure() {
    let service = MockService::replying(StatusCode::CREATED, json!({ "ok": true }));
    let base = spawn_mock_service(service).await.expect("server");

    let err = api_for(&base)
        .create_lead(&lead_request())
        .await
        .expect_err("must fail");
    assert!(matches!(err, CrmError::RequestFailure(_)));
}

#[tokio::test]
async fn unreachable_service_is_request_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = api_for(&format!("http://{addr}"))
        .create_lead(&lead_request())
        .await
        .expect_err("must fail");
    assert!(matches!(err, CrmError::RequestFailure(_)));
}

#[tokio::test]
async fn create_broadcast_accepts_sparse_success_body() {
    let service = MockService::replying(StatusCode::CREATED, json!({ "status": "draft" }));
    let received = service.received.clone();
    let base = spawn_mock_service(service).await.expect("server");

    let created = api_for(&base)
        .create_broadcast(&CreateBroadcastRequest {
            name: "Promo".into(),
            message: "Hello".into(),
            target_segment: Segment::Deal,
        })
        .await
        .expect("create");
    assert_eq!(created.status.as_deref(), Some("draft"));
    assert!(created.id.is_none());

    let bodies = received.lock().await;
    assert_eq!(
        bodies[0],
        json!({ "name": "Promo", "message": "Hello", "target_segment": "deal" })
    );
}

#[tokio::test]
async fn broadcast_success_with_unexpected_body_falls_back_to_empty_result() {
    let service = MockService::replying(StatusCode::OK, json!("queued"));
    let base = spawn_mock_service(service).await.expect("server");

    let created = api_for(&base)
        .create_broadcast(&CreateBroadcastRequest {
            name: "Promo".into(),
            message: "Hello".into(),
            target_segment: Segment::All,
        })
        .await
        .expect("2xx is success");
    assert!(created.id.is_none());
    assert!(created.status.is_none());
    assert!(created.recipients_count.is_none());
}
