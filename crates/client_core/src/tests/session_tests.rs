use super::*;

fn temp_token_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("portfolio-session-{}-{}", std::process::id(), name))
        .join("token")
}

#[tokio::test]
async fn memory_store_round_trips_token() {
    let store = MemoryTokenStore::default();
    assert_eq!(store.load().await.expect("load"), None);

    store.store("abc").await.expect("store");
    assert_eq!(store.load().await.expect("load").as_deref(), Some("abc"));

    store.clear().await.expect("clear");
    assert_eq!(store.load().await.expect("load"), None);
}

#[tokio::test]
async fn file_store_persists_between_instances() {
    let path = temp_token_path("persist");
    let first = FileTokenStore::new(&path);
    first.store("token-1").await.expect("store");

    let second = FileTokenStore::new(&path);
    assert_eq!(second.load().await.expect("load").as_deref(), Some("token-1"));

    second.clear().await.expect("clear");
    assert_eq!(first.load().await.expect("load"), None);
    // Clearing twice is not an error.
    first.clear().await.expect("clear again");
}

#[tokio::test]
async fn file_store_missing_file_is_logged_out() {
    let store = FileTokenStore::new(temp_token_path("missing"));
    assert_eq!(store.load().await.expect("load"), None);
}

#[tokio::test]
async fn set_token_and_clear_emit_events() {
    let session = Session::in_memory();
    let mut events = session.subscribe();

    session.set_token("abc").await.expect("set token");
    assert!(session.is_authenticated().await);
    assert_eq!(events.recv().await.expect("event"), ClientEvent::LoggedIn);

    session.clear().await.expect("clear");
    assert!(!session.is_authenticated().await);
    assert_eq!(events.recv().await.expect("event"), ClientEvent::LoggedOut);
}

#[tokio::test]
async fn mark_unauthorized_clears_token_and_notifies() {
    let session = Session::new(Arc::new(MemoryTokenStore::with_token("stale")));
    let mut events = session.subscribe();

    session.mark_unauthorized().await;

    assert_eq!(session.token().await, None);
    assert_eq!(events.recv().await.expect("event"), ClientEvent::Unauthorized);
}
