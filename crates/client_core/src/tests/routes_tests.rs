use super::*;

#[test]
fn parses_and_formats_every_view() {
    let paths = [
        "/login",
        "/dashboard",
        "/portfolio",
        "/portfolio/initiatives/12",
        "/ai-projects",
        "/ai-projects/new",
        "/ai-projects/4/business-understanding",
        "/ai-projects/4/data-understanding",
        "/ai-projects/4/data-preparation",
        "/ai-projects/4/model-development",
        "/ai-projects/4/deployment",
        "/ai-projects/4/monitoring",
        "/benefits",
        "/benefits/4",
        "/reporting",
        "/analytics",
        "/roadmap",
    ];
    for path in paths {
        let route = Route::parse(path);
        assert!(!matches!(route, Route::NotFound(_)), "{path} should parse");
        assert_eq!(route.to_string(), path);
    }
}

#[test]
fn root_is_dashboard_and_unknown_paths_are_kept() {
    assert_eq!(Route::parse("/"), Route::Dashboard);
    assert_eq!(
        Route::parse("/ai-projects/abc/monitoring"),
        Route::NotFound("/ai-projects/abc/monitoring".to_string())
    );
    assert_eq!(
        Route::parse("/ai-projects/4/unknown-phase"),
        Route::NotFound("/ai-projects/4/unknown-phase".to_string())
    );
}

#[test]
fn location_keeps_query_string() {
    let location = Location::parse("/ai-projects/new?initiative_id=7&source=portfolio");
    assert_eq!(location.route, Route::NewAiProject);
    assert_eq!(location.query_param("initiative_id").as_deref(), Some("7"));
    assert_eq!(
        location.to_string(),
        "/ai-projects/new?initiative_id=7&source=portfolio"
    );
}

#[test]
fn unauthorized_redirects_to_login_once() {
    let mut router = Router::new(Route::Initiative(InitiativeId(3)));

    assert!(router.handle_event(&ClientEvent::Unauthorized));
    assert_eq!(router.route(), &Route::Login);
    assert_eq!(
        router.current().query_param("next").as_deref(),
        Some("/portfolio/initiatives/3")
    );
    let depth = router.history_len();

    // Already on /login: no second redirect.
    assert!(!router.handle_event(&ClientEvent::Unauthorized));
    assert_eq!(router.route(), &Route::Login);
    assert_eq!(router.history_len(), depth);
}

#[test]
fn unrelated_events_do_not_navigate() {
    let mut router = Router::default();
    assert!(!router.handle_event(&ClientEvent::LoggedIn));
    assert!(!router.handle_event(&ClientEvent::Error("boom".into())));
    assert_eq!(router.route(), &Route::Dashboard);
}

#[test]
fn back_restores_previous_state_payload() {
    let mut router = Router::new(Route::NewAiProject);
    let state = NavigationState {
        selected_use_case: None,
        problem_statement: Some("claims backlog".into()),
        ai_pattern: Some(AiPattern::Recognition),
    };
    router.navigate(Navigation::with_state(Route::NewAiProject, state.clone()));
    router.navigate_to(Route::business_understanding(InitiativeId(5)));
    assert_eq!(router.state(), None);

    assert!(router.back());
    assert_eq!(router.state(), Some(&state));
    assert!(router.back());
    assert_eq!(router.state(), None);
    assert!(!router.back());
}

#[test]
fn navigation_state_serializes_null_use_case() {
    let state = NavigationState::default();
    let encoded = serde_json::to_value(&state).expect("encode");
    assert_eq!(encoded, serde_json::json!({ "selected_use_case": null }));
}

#[test]
fn login_redirect_keeps_the_query_of_the_interrupted_view() {
    let mut router = Router::starting_at(Location::parse("/ai-projects/new?initiative_id=7"));

    assert!(router.handle_event(&ClientEvent::LoggedOut));

    assert_eq!(
        router.current().query_param("next").as_deref(),
        Some("/ai-projects/new?initiative_id=7")
    );
}
