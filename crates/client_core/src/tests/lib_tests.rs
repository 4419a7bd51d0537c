use std::sync::Mutex;

use anyhow::Result;
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router as HttpRouter,
};
use serde_json::json;
use shared::domain::InitiativeId;
use tokio::net::TcpListener;

use super::*;

#[derive(Clone, Default)]
struct Gatekeeper {
    seen_tokens: Arc<Mutex<Vec<Option<String>>>>,
}

async fn spawn_gatekeeper() -> Result<(String, Gatekeeper)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let gatekeeper = Gatekeeper::default();
    let seen = gatekeeper.seen_tokens.clone();
    let app = HttpRouter::new()
        .route(
            "/api/v1/initiatives",
            get(move |headers: HeaderMap| {
                let seen = seen.clone();
                async move {
                    let token = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.lock().expect("lock").push(token.clone());
                    if token.as_deref() == Some("Bearer valid") {
                        Json(json!([{ "id": 1, "title": "Claims triage" }])).into_response()
                    } else {
                        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "expired" })))
                            .into_response()
                    }
                }
            }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), gatekeeper))
}

fn client_with_token(server_url: &str, token: &str) -> Arc<PortfolioClient> {
    let session = Session::new(Arc::new(MemoryTokenStore::with_token(token)));
    let api = ApiClient::with_base_url(server_url, session).expect("client");
    PortfolioClient::new(api)
}

#[tokio::test]
async fn expired_token_routes_to_login_once() {
    let (server_url, gatekeeper) = spawn_gatekeeper().await.expect("spawn server");
    let client = client_with_token(&server_url, "stale");
    let mut events = client.subscribe_events();
    let mut router = Router::new(Route::Portfolio);

    let err = client
        .portfolio
        .fetch_initiatives()
        .await
        .expect_err("401");
    assert!(err.requires_reauth());
    assert!(!client.session().is_authenticated().await);

    let event = events.recv().await.expect("event");
    assert_eq!(event, ClientEvent::Unauthorized);
    assert!(router.handle_event(&event));
    assert_eq!(router.route(), &Route::Login);

    // A second 401 while already on /login does not navigate again.
    let _ = client.portfolio.fetch_initiatives().await;
    let event = events.recv().await.expect("event");
    assert!(!router.handle_event(&event));
    assert_eq!(router.route(), &Route::Login);

    let tokens = gatekeeper.seen_tokens.lock().expect("lock").clone();
    assert_eq!(tokens, vec![Some("Bearer stale".to_string()), None]);
}

#[tokio::test]
async fn stores_share_one_session() {
    let (server_url, _gatekeeper) = spawn_gatekeeper().await.expect("spawn server");
    let client = client_with_token(&server_url, "valid");

    let initiatives = client
        .portfolio
        .fetch_initiatives()
        .await
        .expect("initiatives");
    assert_eq!(initiatives[0].id, InitiativeId(1));
    assert!(client.auth.is_authenticated().await);

    client.auth.logout().await.expect("logout");
    assert!(!client.session().is_authenticated().await);
}

#[test]
fn assist_kinds_have_labels() {
    assert_eq!(AssistKind::Drift.label(), "drift analysis");
    assert_eq!(AssistKind::Report.label(), "report generation");
}
