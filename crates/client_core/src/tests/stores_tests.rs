use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicI64, Ordering},
        Arc,
    },
};

use anyhow::Result;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{
    domain::{
        BenefitId, DatasetId, DeploymentId, HealthStatus, InitiativeId, KpiId,
        PreparationStepId, ReportType,
    },
    protocol::{
        BenefitPayload, DatasetPayload, GenerateReportRequest, KpiPayload, MonitoringPayload,
        PreparationStepPayload,
    },
};
use tokio::net::TcpListener;

use super::*;
use crate::{
    forms::{DatasetForm, FormMode, MonitoringForm},
    session::Session,
    stores::{
        AiProjectsStore, AnalyticsStore, AuthStore, BenefitsStore, PortfolioStore, ReportingStore,
    },
    transport::ApiClient,
    ClientEvent,
};

#[derive(Clone, Default)]
struct Backend {
    next_id: Arc<AtomicI64>,
    fail_datasets: Arc<AtomicBool>,
    reject_profile: Arc<AtomicBool>,
    deleted: Arc<std::sync::Mutex<Vec<i64>>>,
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn list_datasets(State(backend): State<Backend>) -> impl IntoResponse {
    if backend.fail_datasets.load(Ordering::SeqCst) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "detail": "Profiling service unavailable" })),
        )
            .into_response();
    }
    Json(json!([
        { "id": 1, "initiative_id": 7, "name": "claims", "record_count": "1200" },
        { "id": 2, "initiative_id": 7, "name": "policies", "quality_issues": ["duplicates"] }
    ]))
    .into_response()
}

async fn create_dataset(
    State(backend): State<Backend>,
    Path(initiative_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id = 100 + backend.next_id.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "success": true,
        "data": {
            "id": id,
            "initiative_id": initiative_id,
            "name": body["name"],
            "record_count": body["record_count"],
        }
    }))
}

async fn update_dataset(Path(dataset_id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": dataset_id,
        "initiative_id": 7,
        "name": body["name"],
        "record_count": body["record_count"],
    }))
}

async fn monitoring_history(Path(deployment_id): Path<i64>) -> Json<Value> {
    Json(json!({ "items": [
        { "id": 1, "deployment_id": deployment_id, "drift_score": 0.1,
          "health_status": "healthy", "recorded_at": "2026-03-02T10:00:00Z" },
        { "id": 2, "deployment_id": deployment_id, "drift_score": 0.4,
          "health_status": "degraded", "recorded_at": "2026-03-05T10:00:00Z" },
        { "id": 3, "deployment_id": deployment_id, "drift_score": 0.2,
          "health_status": "healthy", "recorded_at": "2026-03-03T10:00:00Z" }
    ]}))
}

async fn record_monitoring(Path(deployment_id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": 4,
        "deployment_id": deployment_id,
        "drift_score": body["drift_score"],
        "health_status": body["health_status"],
        "recorded_at": "2026-03-09T10:00:00Z"
    }))
}

async fn initiative(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({ "id": id, "title": "Fraud detection", "budget": "250000.50" }))
}

async fn risks() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "risk service down" })))
}

async fn benefits() -> Json<Value> {
    Json(json!([{ "id": 5, "initiative_id": 7, "name": "Reduced losses", "target_value": "1.5" }]))
}

async fn milestones() -> Json<Value> {
    Json(json!({ "success": true, "data": [{ "id": 8, "initiative_id": 7, "title": "Pilot" }] }))
}

async fn feasibility() -> Json<Value> {
    Json(json!({ "recommendation": "go", "overall_score": "0.82",
                 "factors": [{ "name": "data", "score": 0.9 }] }))
}

async fn me(State(backend): State<Backend>) -> impl IntoResponse {
    if backend.reject_profile.load(Ordering::SeqCst) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "expired" }))).into_response();
    }
    Json(json!({ "id": 1, "username": "ada", "full_name": "Ada Lovelace" })).into_response()
}

async fn login(Form(credentials): Form<Credentials>) -> impl IntoResponse {
    if credentials.password == "wrong" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Incorrect username or password" })),
        )
            .into_response();
    }
    Json(json!({ "access_token": format!("token-for-{}", credentials.username) })).into_response()
}

async fn list_steps(Path(initiative_id): Path<i64>) -> Json<Value> {
    Json(json!([
        { "id": 1, "initiative_id": initiative_id, "step_order": 3, "name": "impute" },
        { "id": 2, "initiative_id": initiative_id, "step_order": "1", "step_name": "dedupe" }
    ]))
}

async fn create_step(Path(initiative_id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": 3,
        "initiative_id": initiative_id,
        "step_order": body["step_order"],
        "name": body["name"],
    }))
}

async fn update_step(Path(step_id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": step_id,
        "initiative_id": 7,
        "step_order": body["step_order"],
        "name": body["name"],
    }))
}

async fn list_initiatives() -> Json<Value> {
    Json(json!({ "success": true, "data": [
        { "id": 7, "title": "Fraud detection" },
        { "id": 9, "title": "Churn model" }
    ]}))
}

async fn delete_initiative(State(backend): State<Backend>, Path(id): Path<i64>) -> StatusCode {
    backend.deleted.lock().expect("lock").push(id);
    StatusCode::NO_CONTENT
}

async fn create_benefit(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": 50,
        "initiative_id": body["initiative_id"],
        "name": body["name"],
        "target_value": body["target_value"],
    }))
}

async fn update_benefit(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": id,
        "initiative_id": body["initiative_id"],
        "name": body["name"],
        "actual_value": body["actual_value"],
    }))
}

async fn list_kpis(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let initiative_id = query
        .get("initiative_id")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or_default();
    Json(json!([
        { "id": 1, "initiative_id": initiative_id, "name": "Loss ratio", "target": "0.6" },
        { "id": 2, "initiative_id": initiative_id, "kpi_name": "Handling time" }
    ]))
}

async fn create_kpi(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "id": 3, "initiative_id": body["initiative_id"], "name": body["name"] }))
}

async fn update_kpi(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": id,
        "initiative_id": body["initiative_id"],
        "name": body["name"],
        "current": body["current"],
    }))
}

async fn list_reports() -> Json<Value> {
    Json(json!([{ "id": 1, "title": "Q1 portfolio", "report_type": "portfolio" }]))
}

async fn generate_report(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "id": 2,
            "title": body["title"],
            "report_type": body["report_type"],
            "summary": "Two initiatives on track",
        }
    }))
}

async fn analytics_dashboard() -> Json<Value> {
    Json(json!({ "initiative_count": "4", "active_deployments": 2, "average_drift": "0.12" }))
}

async fn analytics_trends(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let monthly_roi = query.get("metric").map(String::as_str) == Some("roi")
        && query.get("period").map(String::as_str) == Some("monthly");
    if !monthly_roi {
        return Json(json!([]));
    }
    Json(json!([
        { "period": "2026-01", "value": "3" },
        { "date": "2026-02", "value": 5 }
    ]))
}

async fn spawn_backend() -> Result<(String, Backend)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let backend = Backend::default();
    let app = Router::new()
        .route(
            "/api/v1/ai-projects/:id/data-understanding",
            get(list_datasets).post(create_dataset),
        )
        .route(
            "/api/v1/ai-projects/data-understanding/:id",
            put(update_dataset),
        )
        .route(
            "/api/v1/ai-projects/deployments/:id/monitoring",
            get(monitoring_history).post(record_monitoring),
        )
        .route(
            "/api/v1/ai-projects/:id/business-understanding/feasibility",
            post(feasibility),
        )
        .route(
            "/api/v1/ai-projects/:id/data-preparation",
            get(list_steps).post(create_step),
        )
        .route(
            "/api/v1/ai-projects/data-preparation/:id",
            put(update_step),
        )
        .route("/api/v1/initiatives", get(list_initiatives))
        .route(
            "/api/v1/initiatives/:id",
            get(initiative).delete(delete_initiative),
        )
        .route("/api/v1/initiatives/:id/risks", get(risks))
        .route("/api/v1/benefits", get(benefits).post(create_benefit))
        .route("/api/v1/benefits/:id", put(update_benefit))
        .route("/api/v1/benefits/kpis", get(list_kpis).post(create_kpi))
        .route("/api/v1/benefits/kpis/:id", put(update_kpi))
        .route("/api/v1/reporting/reports", get(list_reports))
        .route("/api/v1/reporting/reports/generate", post(generate_report))
        .route("/api/v1/analytics/dashboard", get(analytics_dashboard))
        .route("/api/v1/analytics/trends", get(analytics_trends))
        .route("/api/v1/roadmap/milestones", get(milestones))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), backend))
}

fn api(server_url: &str) -> ApiClient {
    ApiClient::with_base_url(server_url, Session::in_memory()).expect("client")
}

fn dataset_payload(name: &str, record_count: &str) -> DatasetPayload {
    DatasetForm {
        name: name.to_string(),
        record_count: record_count.to_string(),
        ..DatasetForm::default()
    }
    .to_payload()
}

#[test]
fn status_cycle_sets_and_clears_flags() {
    let mut status = StoreStatus::default();
    status.error = Some("old".into());

    status.begin(Activity::Assist);
    assert!(status.ai_loading);
    assert!(!status.loading);
    assert_eq!(status.error, None);

    status.fail(Activity::Assist, &ClientError::Validation("bad".into()));
    assert!(!status.ai_loading);
    assert_eq!(status.error.as_deref(), Some("bad"));
}

#[tokio::test]
async fn created_dataset_is_appended_once_and_updated_in_place() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = AiProjectsStore::new(api(&server_url));
    let initiative = InitiativeId(7);

    store.fetch_datasets(initiative).await.expect("fetch");
    let created = store
        .save_dataset(initiative, FormMode::Create, &dataset_payload("payments", "50"))
        .await
        .expect("create");

    let state = store.snapshot().await;
    assert_eq!(state.datasets.len(), 3);
    assert_eq!(
        state
            .datasets
            .items()
            .iter()
            .filter(|d| d.id == created.id)
            .count(),
        1
    );
    assert_eq!(state.datasets.last().map(|d| d.name.as_str()), Some("payments"));

    store
        .save_dataset(
            initiative,
            FormMode::Edit(DatasetId(2)),
            &dataset_payload("policies-2026", "abc"),
        )
        .await
        .expect("update");

    let state = store.snapshot().await;
    assert_eq!(state.datasets.len(), 3);
    let updated = &state.datasets.items()[1];
    assert_eq!(updated.id, DatasetId(2));
    assert_eq!(updated.name, "policies-2026");
    // Non-numeric input reached the backend as 0, not NaN or null.
    assert_eq!(updated.record_count, Some(0));
    assert!(!state.status.loading);
}

#[tokio::test]
async fn failed_fetch_keeps_cached_records() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    let store = AiProjectsStore::new(api(&server_url));

    store.fetch_datasets(InitiativeId(7)).await.expect("fetch");
    backend.fail_datasets.store(true, Ordering::SeqCst);

    let err = store
        .fetch_datasets(InitiativeId(7))
        .await
        .expect_err("second fetch fails");

    let state = store.snapshot().await;
    assert_eq!(state.datasets.len(), 2);
    assert_eq!(state.status.error.as_deref(), Some("Profiling service unavailable"));
    assert_eq!(err.display_message(), "Profiling service unavailable");
    assert!(!state.status.loading);
}

#[tokio::test]
async fn recording_monitoring_appends_and_becomes_latest() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = AiProjectsStore::new(api(&server_url));
    let deployment = DeploymentId(3);

    store
        .fetch_monitoring_history(deployment)
        .await
        .expect("history");
    let state = store.snapshot().await;
    assert_eq!(state.monitoring_history.len(), 3);
    assert_eq!(
        state.latest_monitoring.as_ref().map(|r| r.id.0),
        Some(2),
        "latest is the newest recorded_at, not the last row"
    );

    let payload: MonitoringPayload = MonitoringForm {
        drift_score: "0.55".into(),
        health_status: "critical".into(),
        ..MonitoringForm::default()
    }
    .to_payload();
    let record = store
        .record_monitoring(deployment, &payload)
        .await
        .expect("record");

    let state = store.snapshot().await;
    assert_eq!(state.monitoring_history.len(), 4);
    assert_eq!(state.monitoring_history.last().map(|r| r.id), Some(record.id));
    let latest = state.latest_monitoring.expect("latest");
    assert_eq!(latest.id, record.id);
    assert_eq!(latest.health_status, HealthStatus::Critical);
    assert_eq!(latest.drift_score, Some(0.55));
}

#[tokio::test]
async fn detail_survives_one_failed_branch() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = PortfolioStore::new(api(&server_url));

    let detail = store
        .fetch_initiative_detail(InitiativeId(7))
        .await
        .expect("detail");

    assert_eq!(detail.initiative.title, "Fraud detection");
    assert_eq!(detail.initiative.budget, Some(250000.5));
    assert_eq!(detail.benefits.len(), 1);
    assert_eq!(detail.milestones.len(), 1);
    assert!(detail.risks.is_empty());
    assert_eq!(detail.failures, vec!["risks: risk service down".to_string()]);

    let state = store.snapshot().await;
    assert_eq!(state.current.map(|i| i.id), Some(InitiativeId(7)));
    assert_eq!(state.status.error, None);
}

#[tokio::test]
async fn assist_call_uses_ai_flag_and_announces_completion() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let api = api(&server_url);
    let mut events = api.session().subscribe();
    let store = AiProjectsStore::new(api);

    let assessment = store
        .assess_feasibility(InitiativeId(7))
        .await
        .expect("feasibility");

    assert_eq!(assessment.overall_score, Some(0.82));
    assert_eq!(assessment.factors.len(), 1);
    let state = store.snapshot().await;
    assert!(!state.status.ai_loading);
    assert!(state.assist.feasibility.is_some());
    assert!(state.business_understanding.is_none());
    assert_eq!(
        events.recv().await.expect("event"),
        ClientEvent::AssistCompleted {
            kind: crate::AssistKind::Feasibility
        }
    );
}

#[tokio::test]
async fn login_stores_token_and_loads_profile() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let api = api(&server_url);
    let session = api.session().clone();
    let store = AuthStore::new(api);

    store.login("ada", "pw").await.expect("login");

    assert!(store.is_authenticated().await);
    assert_eq!(session.token().await.as_deref(), Some("token-for-ada"));
    let state = store.snapshot().await;
    assert_eq!(state.user.map(|u| u.username), Some("ada".to_string()));
    assert_eq!(state.status.error, None);
}

#[tokio::test]
async fn login_fails_when_profile_fetch_is_rejected() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    backend.reject_profile.store(true, Ordering::SeqCst);
    let api = api(&server_url);
    let session = api.session().clone();
    let mut events = session.subscribe();
    let store = AuthStore::new(api);

    let err = store.login("ada", "pw").await.expect_err("profile rejected");

    assert!(err.requires_reauth());
    assert_eq!(events.recv().await.expect("event"), ClientEvent::LoggedIn);
    // /auth/me answered 401, which clears the token again.
    assert_eq!(events.recv().await.expect("event"), ClientEvent::Unauthorized);
    assert!(!store.is_authenticated().await);
    assert!(store.snapshot().await.user.is_none());
}

#[tokio::test]
async fn bad_credentials_show_backend_message() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = AuthStore::new(api(&server_url));

    let err = store.login("ada", "wrong").await.expect_err("rejected");

    assert_eq!(err.display_message(), "Incorrect username or password");
    assert_eq!(
        store.snapshot().await.status.error.as_deref(),
        Some("Incorrect username or password")
    );
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn login_requires_credentials() {
    let store = AuthStore::new(api("http://127.0.0.1:9"));

    let err = store.login("  ", "pw").await.expect_err("blank username");

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(
        store.snapshot().await.status.error.as_deref(),
        Some("Username and password are required")
    );
}

#[tokio::test]
async fn preparation_steps_stay_ordered_by_step_order() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = AiProjectsStore::new(api(&server_url));
    let initiative = InitiativeId(7);
    let names = |steps: &[shared::protocol::PreparationStep]| {
        steps.iter().map(|s| s.name.clone()).collect::<Vec<_>>()
    };

    store
        .fetch_preparation_steps(initiative)
        .await
        .expect("fetch");
    let state = store.snapshot().await;
    assert_eq!(names(state.preparation_steps.items()), ["dedupe", "impute"]);

    let created = store
        .create_preparation_step(
            initiative,
            &PreparationStepPayload {
                step_order: 2,
                name: "normalize".into(),
                ..PreparationStepPayload::default()
            },
        )
        .await
        .expect("create");
    assert_eq!(created.id, PreparationStepId(3));
    let state = store.snapshot().await;
    assert_eq!(
        names(state.preparation_steps.items()),
        ["dedupe", "normalize", "impute"]
    );

    store
        .update_preparation_step(
            PreparationStepId(2),
            &PreparationStepPayload {
                step_order: 5,
                name: "dedupe".into(),
                ..PreparationStepPayload::default()
            },
        )
        .await
        .expect("update");
    let state = store.snapshot().await;
    assert_eq!(state.preparation_steps.len(), 3);
    assert_eq!(
        names(state.preparation_steps.items()),
        ["normalize", "impute", "dedupe"]
    );
}

#[tokio::test]
async fn deleting_an_initiative_removes_it_by_id() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    let store = PortfolioStore::new(api(&server_url));

    store.fetch_initiatives().await.expect("fetch");
    store
        .fetch_initiative(InitiativeId(7))
        .await
        .expect("current");
    store
        .delete_initiative(InitiativeId(7))
        .await
        .expect("delete");

    assert_eq!(backend.deleted.lock().expect("lock").clone(), vec![7]);
    let state = store.snapshot().await;
    assert_eq!(state.initiatives.len(), 1);
    assert!(state.initiatives.get(InitiativeId(7)).is_none());
    assert!(state.initiatives.get(InitiativeId(9)).is_some());
    assert!(state.current.is_none());
}

#[tokio::test]
async fn benefits_are_appended_and_updated_in_place() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = BenefitsStore::new(api(&server_url));
    let payload = BenefitPayload {
        initiative_id: InitiativeId(7),
        name: "Faster payouts".into(),
        target_value: Some(0.0),
        ..BenefitPayload::default()
    };

    store
        .fetch_benefits(Some(InitiativeId(7)))
        .await
        .expect("fetch");
    let created = store.create_benefit(&payload).await.expect("create");
    assert_eq!(created.id, BenefitId(50));
    assert_eq!(created.target_value, Some(0.0));

    store
        .update_benefit(
            BenefitId(5),
            &BenefitPayload {
                name: "Reduced losses".into(),
                actual_value: Some(1.2),
                ..payload
            },
        )
        .await
        .expect("update");

    let state = store.snapshot().await;
    assert_eq!(state.benefits.len(), 2);
    let first = &state.benefits.items()[0];
    assert_eq!(first.id, BenefitId(5));
    assert_eq!(first.actual_value, Some(1.2));
    assert_eq!(state.benefits.last().map(|b| b.id), Some(BenefitId(50)));
}

#[tokio::test]
async fn kpi_updates_replace_known_ids_and_append_unknown_ones() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = BenefitsStore::new(api(&server_url));
    let payload = |name: &str| KpiPayload {
        initiative_id: InitiativeId(7),
        name: name.to_string(),
        current: Some(0.4),
        ..KpiPayload::default()
    };

    store.fetch_kpis(InitiativeId(7)).await.expect("fetch");
    let state = store.snapshot().await;
    assert_eq!(state.kpis.len(), 2);
    assert_eq!(state.kpis.items()[0].target, Some(0.6));

    store
        .update_kpi(KpiId(2), &payload("Handling time (h)"))
        .await
        .expect("update known");
    store
        .update_kpi(KpiId(8), &payload("Reopen rate"))
        .await
        .expect("update unknown");
    store
        .create_kpi(&payload("Appeals"))
        .await
        .expect("create");

    let state = store.snapshot().await;
    let ids: Vec<KpiId> = state.kpis.items().iter().map(|k| k.id).collect();
    assert_eq!(ids, [KpiId(1), KpiId(2), KpiId(8), KpiId(3)]);
    assert_eq!(state.kpis.items()[1].name, "Handling time (h)");
    assert_eq!(state.kpis.items()[1].current, Some(0.4));
}

#[tokio::test]
async fn generated_report_is_appended_and_becomes_current() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let api = api(&server_url);
    let mut events = api.session().subscribe();
    let store = ReportingStore::new(api);

    store.fetch_reports().await.expect("fetch");
    let report = store
        .generate_report(&GenerateReportRequest {
            report_type: ReportType::Executive,
            title: Some("Board pack".into()),
            initiative_ids: vec![InitiativeId(7)],
            ..GenerateReportRequest::default()
        })
        .await
        .expect("generate");

    assert_eq!(report.title, "Board pack");
    assert_eq!(report.report_type, ReportType::Executive);
    let state = store.snapshot().await;
    assert_eq!(state.reports.len(), 2);
    assert_eq!(state.reports.last().map(|r| r.id), Some(report.id));
    assert_eq!(state.current.map(|r| r.id), Some(report.id));
    assert!(!state.status.ai_loading);
    assert_eq!(
        events.recv().await.expect("event"),
        ClientEvent::AssistCompleted {
            kind: crate::AssistKind::Report
        }
    );
}

#[tokio::test]
async fn analytics_dashboard_and_trends_are_cached() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let store = AnalyticsStore::new(api(&server_url));

    let dashboard = store.fetch_dashboard().await.expect("dashboard");
    assert_eq!(dashboard.initiative_count, 4);
    assert_eq!(dashboard.average_drift, Some(0.12));

    let points = store.fetch_trends("roi", "monthly").await.expect("trends");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].value, 3.0);
    assert_eq!(points[1].period, "2026-02");

    let state = store.snapshot().await;
    assert!(state.dashboard.is_some());
    assert_eq!(state.trends.get("roi").map(Vec::len), Some(2));
    assert!(!state.status.loading);
}
