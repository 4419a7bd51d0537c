use std::{collections::HashMap, sync::Mutex};

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::*;
use crate::{session::Session, transport::ApiClient};

const PROBLEM: &str = "Claims adjusters spend hours triaging incoming claims by hand; we want to \
                       flag likely fraud and route simple claims to straight-through processing.";

#[derive(Clone, Default)]
struct Backend {
    classify_calls: Arc<Mutex<u32>>,
    similarity_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    links: Arc<Mutex<Vec<Value>>>,
    fail_similarity: Arc<Mutex<bool>>,
}

async fn classify(State(backend): State<Backend>) -> Json<Value> {
    *backend.classify_calls.lock().expect("lock") += 1;
    Json(json!({
        "suggested_pattern": "patterns_and_anomalies",
        "confidence": "0.87",
        "reasoning": "Fraud is an anomaly detection problem",
        "alternatives": [{ "pattern": "predictive_analytics", "confidence": 0.4 }]
    }))
}

async fn similar(
    State(backend): State<Backend>,
    Query(query): Query<HashMap<String, String>>,
) -> axum::response::Response {
    backend.similarity_queries.lock().expect("lock").push(query);
    if *backend.fail_similarity.lock().expect("lock") {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "detail": "Embedding service unavailable" })),
        )
            .into_response();
    }
    Json(json!({ "success": true, "data": [
        { "initiative_id": 11, "title": "Fraud scoring", "similarity_score": 0.91,
          "use_case": "{\"title\":\"Fraud scoring\",\"initiative_id\":11}" },
        { "id": 12, "name": "Claims routing", "similarity": "0.55",
          "use_case": "{broken" }
    ]}))
    .into_response()
}

async fn recommend() -> Json<Value> {
    Json(json!({ "recommended_initiative_id": 11, "reasoning": "closest match", "confidence": 0.8 }))
}

async fn link(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.links.lock().expect("lock").push(body.clone());
    Json(json!({
        "id": 1,
        "initiative_id": body["initiative_id"],
        "problem_statement": body["problem_statement"],
        "ai_pattern": body["ai_pattern"],
        "selected_use_case": body["selected_use_case"],
    }))
}

async fn spawn_backend() -> Result<(String, Backend)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let backend = Backend::default();
    let base = "/api/v1/ai-projects/business-understanding";
    let app = Router::new()
        .route(&format!("{base}/classify-pattern"), post(classify))
        .route(&format!("{base}/similar-initiatives"), get(similar))
        .route(&format!("{base}/recommend-initiative"), post(recommend))
        .route(&format!("{base}/link"), post(link))
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), backend))
}

fn wizard_for(server_url: &str) -> BusinessUnderstandingWizard {
    let api = ApiClient::with_base_url(server_url, Session::in_memory()).expect("client");
    BusinessUnderstandingWizard::new(Arc::new(AiProjectsStore::new(api)))
}

async fn wizard_at_similarity(server_url: &str) -> BusinessUnderstandingWizard {
    let mut wizard = wizard_for(server_url);
    wizard.set_problem(PROBLEM);
    wizard.analyze().await.expect("analyze");
    wizard.search_similar().await.expect("search");
    wizard
}

#[tokio::test]
async fn short_problem_cannot_be_analyzed() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_for(&server_url);
    wizard.set_problem("Too short to classify.");

    assert!(!wizard.can_analyze());
    let err = wizard.analyze().await.expect_err("gate");

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(wizard.classification().is_none());
    assert_eq!(wizard.step(), WizardStep::Problem);
    assert!(wizard.banner().is_some());
    assert_eq!(*backend.classify_calls.lock().expect("lock"), 0);
}

#[tokio::test]
async fn gate_counts_trimmed_characters() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_for(&server_url);

    wizard.set_problem(format!("   {}   ", "é".repeat(MIN_PROBLEM_LEN - 1)));
    assert!(!wizard.can_analyze());

    wizard.set_problem("é".repeat(MIN_PROBLEM_LEN));
    assert!(wizard.can_analyze());
}

#[tokio::test]
async fn classification_can_be_overridden() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_for(&server_url);
    wizard.set_problem(PROBLEM);

    let classification = wizard.analyze().await.expect("analyze");
    assert_eq!(classification.pattern, Some(AiPattern::PatternsAndAnomalies));
    assert_eq!(wizard.step(), WizardStep::Pattern);

    wizard
        .override_pattern(AiPattern::PredictiveAnalytics)
        .expect("override");
    assert_eq!(wizard.suggested_pattern(), Some(AiPattern::PatternsAndAnomalies));
    assert_eq!(wizard.effective_pattern(), Some(AiPattern::PredictiveAnalytics));

    wizard.search_similar().await.expect("search");
    let queries = backend.similarity_queries.lock().expect("lock").clone();
    assert_eq!(queries[0]["ai_pattern"], "predictive_analytics");
}

#[tokio::test]
async fn pattern_cannot_be_chosen_before_analysis() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_for(&server_url);

    assert!(wizard.override_pattern(AiPattern::Recognition).is_err());
    assert!(wizard.search_similar().await.is_err());
    assert_eq!(wizard.step(), WizardStep::Problem);
}

#[tokio::test]
async fn skip_links_without_use_case() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_at_similarity(&server_url).await;
    wizard.select_candidate(InitiativeId(12)).expect("select");

    let navigation = wizard.link(LinkChoice::Skip).await.expect("link");

    assert_eq!(
        navigation.location.to_string(),
        "/ai-projects/12/business-understanding"
    );
    let state = navigation.state.expect("state");
    assert_eq!(state.selected_use_case, None);
    let encoded = serde_json::to_value(&state).expect("encode");
    assert!(encoded["selected_use_case"].is_null());

    let links = backend.links.lock().expect("lock").clone();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["match_feedback"], "skipped");
    assert!(links[0]["selected_use_case"].is_null());
}

#[tokio::test]
async fn no_match_links_the_target_initiative() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_at_similarity(&server_url).await;

    assert!(wizard.link(LinkChoice::NoMatch).await.is_err());
    assert!(wizard.banner().is_some());

    wizard.set_target(InitiativeId(40));
    let navigation = wizard.link(LinkChoice::NoMatch).await.expect("link");

    assert_eq!(navigation.location.route, Route::business_understanding(InitiativeId(40)));
    let links = backend.links.lock().expect("lock").clone();
    assert_eq!(links[0]["match_feedback"], "no_match");
}

#[tokio::test]
async fn selected_candidate_carries_its_use_case() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_at_similarity(&server_url).await;

    let recommendation = wizard.recommend().await.expect("recommend");
    assert_eq!(recommendation.recommended_initiative_id, Some(InitiativeId(11)));

    let navigation = wizard
        .link(LinkChoice::Selected(InitiativeId(11)))
        .await
        .expect("link");
    let use_case = navigation
        .state
        .and_then(|state| state.selected_use_case)
        .expect("use case");
    assert_eq!(use_case.title, "Fraud scoring");
    assert_eq!(use_case.initiative_id, Some(InitiativeId(11)));
}

#[tokio::test]
async fn malformed_candidate_use_case_falls_back_to_the_match() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_at_similarity(&server_url).await;
    assert!(wizard.candidates()[1].use_case.is_malformed());

    let navigation = wizard
        .link(LinkChoice::Selected(InitiativeId(12)))
        .await
        .expect("link");
    let use_case = navigation
        .state
        .and_then(|state| state.selected_use_case)
        .expect("use case");
    assert_eq!(use_case.title, "Claims routing");
}

#[tokio::test]
async fn failed_search_keeps_current_step_and_sets_banner() {
    let (server_url, backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_for(&server_url);
    wizard.set_problem(PROBLEM);
    wizard.analyze().await.expect("analyze");
    *backend.fail_similarity.lock().expect("lock") = true;

    assert!(wizard.search_similar().await.is_err());

    assert_eq!(wizard.step(), WizardStep::Pattern);
    assert_eq!(wizard.banner(), Some("Embedding service unavailable"));
    assert!(wizard.classification().is_some());
}

#[tokio::test]
async fn back_keeps_collected_state_and_restore_rebuilds() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_at_similarity(&server_url).await;

    let navigation = wizard
        .link(LinkChoice::Selected(InitiativeId(11)))
        .await
        .expect("link");
    assert_eq!(wizard.step(), WizardStep::Link);

    assert_eq!(wizard.back(), WizardStep::Similarity);
    assert_eq!(wizard.candidates().len(), 2);
    assert_eq!(wizard.selected(), Some(InitiativeId(11)));
    assert_eq!(wizard.back(), WizardStep::Pattern);
    assert_eq!(wizard.effective_pattern(), Some(AiPattern::PatternsAndAnomalies));
    assert!(wizard.classification().is_some());

    let state = navigation.state.expect("state");
    let api = ApiClient::with_base_url(&server_url, Session::in_memory()).expect("client");
    let restored =
        BusinessUnderstandingWizard::restore(Arc::new(AiProjectsStore::new(api)), &state);
    assert_eq!(restored.step(), WizardStep::Pattern);
    assert_eq!(restored.problem(), PROBLEM.trim());
    assert_eq!(restored.effective_pattern(), Some(AiPattern::PatternsAndAnomalies));
}

#[tokio::test]
async fn editing_problem_discards_derived_results() {
    let (server_url, _backend) = spawn_backend().await.expect("spawn backend");
    let mut wizard = wizard_at_similarity(&server_url).await;

    wizard.set_problem(format!("{PROBLEM} Also covers subrogation."));

    assert_eq!(wizard.step(), WizardStep::Problem);
    assert!(wizard.classification().is_none());
    assert!(wizard.candidates().is_empty());
}
