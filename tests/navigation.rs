//! End-to-end navigation behaviour through the Router.

use std::sync::Arc;

use futures_util::future::join_all;
use route_navigator::middleware::{guard, MiddlewareOutcome};
use route_navigator::navigation::{NavigationError, NavigationRequest, Params, Router};
use route_navigator::routing::RouteDefinition;
use route_navigator::state::{ChangeKind, HistoryEntry};

mod common;

fn entry(name: &str, params: &[(&str, &str)]) -> HistoryEntry {
    HistoryEntry {
        name: name.to_string(),
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[tokio::test]
async fn test_user_scenario_then_back() {
    let router = common::sample_router();

    let resolved = router
        .go_to(NavigationRequest::new("user").with_param("id", "5"))
        .await
        .unwrap();
    assert_eq!(resolved.name, "user");
    assert_eq!(resolved.route_info.path(), "/user/:id");

    let current = router.current_route().unwrap();
    assert_eq!(current.entry(), entry("user", &[("id", "5")]));
    assert_eq!(router.history(), vec![entry("user", &[("id", "5")])]);

    // One entry: back pops it and resolves with it
    let popped = router.back().await.unwrap();
    assert_eq!(popped, entry("user", &[("id", "5")]));
    assert!(router.history().is_empty());
}

#[tokio::test]
async fn test_absent_route_is_not_found_after_middleware() {
    let router = common::sample_router();
    let log = common::CallLog::default();
    log.install(&router, "mw");

    let err = router.go_to(NavigationRequest::new("ghost")).await.unwrap_err();

    assert_eq!(err, NavigationError::NotFound { name: "ghost".into() });
    assert_eq!(log.calls(), vec!["mw:ghost".to_string()]);
    assert!(router.current_route().is_none());
    assert!(router.history().is_empty());
}

#[tokio::test]
async fn test_reject_beats_not_found_and_stops_pipeline() {
    let router = common::sample_router();
    let log = common::CallLog::default();
    router.add_middleware(guard(|_: &NavigationRequest| false));
    log.install(&router, "after");

    let err = router.go_to(NavigationRequest::new("ghost")).await.unwrap_err();

    assert_eq!(err.kind().as_str(), "REJECTED");
    assert!(log.calls().is_empty());
    assert!(router.snapshot().name().is_none());
}

#[tokio::test]
async fn test_override_reaches_later_middleware_and_lookup() {
    let router = common::sample_router();
    router.add_middleware(|req: NavigationRequest| async move {
        if req.name == "profile" {
            MiddlewareOutcome::Override(NavigationRequest::new("user").with_param("id", "me"))
        } else {
            MiddlewareOutcome::Continue
        }
    });
    let log = common::CallLog::default();
    log.install(&router, "next");

    let resolved = router.go_to(NavigationRequest::new("profile")).await.unwrap();

    assert_eq!(log.calls(), vec!["next:user".to_string()]);
    assert_eq!(resolved.entry(), entry("user", &[("id", "me")]));
    assert_eq!(router.history(), vec![entry("user", &[("id", "me")])]);
}

#[tokio::test]
async fn test_redirect_chain_commits_final_route_once() {
    let router = common::sample_router();
    router.add_routes([
        RouteDefinition::new("old", "/old").redirect_to("mid", Params::new()),
        RouteDefinition::new("mid", "/mid").redirect_to("final", Params::new()),
        RouteDefinition::new("final", "/final"),
    ]);
    let mut changes = router.subscribe();

    let resolved = router.go_to(NavigationRequest::new("old")).await.unwrap();

    assert_eq!(resolved.name, "final");
    assert_eq!(resolved.route_info.name(), "final");
    assert_eq!(router.history(), vec![entry("final", &[])]);

    let change = changes.recv().await.unwrap();
    assert_eq!(change.state.name(), Some("final"));
    assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_cycle_fails_without_state_change() {
    let router = Router::new().with_max_redirect_depth(3);
    router.add_routes([
        RouteDefinition::new("a", "/a").redirect_to("b", Params::new()),
        RouteDefinition::new("b", "/b").redirect_to("a", Params::new()),
    ]);

    let err = router.go_to(NavigationRequest::new("a")).await.unwrap_err();

    assert_eq!(err.kind().as_str(), "REDIRECT_LOOP");
    assert!(router.history().is_empty());
}

#[tokio::test]
async fn test_each_success_pushes_exactly_one_entry() {
    let router = common::sample_router();

    router.go_to(NavigationRequest::new("home")).await.unwrap();
    router.go_to(NavigationRequest::new("user").with_param("id", "1")).await.unwrap();
    router.go_to(NavigationRequest::new("home")).await.unwrap();
    let _ = router.go_to(NavigationRequest::new("ghost")).await;

    assert_eq!(
        router.history(),
        vec![
            entry("home", &[]),
            entry("user", &[("id", "1")]),
            entry("home", &[]),
        ]
    );
}

#[tokio::test]
async fn test_back_skips_middleware_and_does_not_push() {
    let router = common::sample_router();
    let log = common::CallLog::default();
    log.install(&router, "mw");

    router.go_to(NavigationRequest::new("home")).await.unwrap();
    router.go_to(NavigationRequest::new("user").with_param("id", "2")).await.unwrap();
    let mut changes = router.subscribe();

    let popped = router.back().await.unwrap();

    assert_eq!(popped, entry("user", &[("id", "2")]));
    assert_eq!(router.current_route().unwrap().entry(), popped);
    assert_eq!(router.history(), vec![entry("home", &[])]);
    assert_eq!(log.calls(), vec!["mw:home".to_string(), "mw:user".to_string()]);

    let change = changes.recv().await.unwrap();
    assert_eq!(change.kind, ChangeKind::Back);
}

#[tokio::test]
async fn test_back_on_empty_history() {
    let router = common::sample_router();
    assert_eq!(router.back().await.unwrap_err(), NavigationError::Empty);
    assert!(router.history().is_empty());
    assert!(router.current_route().is_none());
}

#[tokio::test]
async fn test_first_route_goes_through_middleware_and_redirects() {
    let router = common::sample_router();
    router.add_routes([RouteDefinition::new("root", "/root").redirect_to("home", Params::new())]);
    let log = common::CallLog::default();
    log.install(&router, "mw");

    let resolved = router.init_first_route(NavigationRequest::new("root")).await.unwrap();

    assert_eq!(resolved.name, "home");
    assert_eq!(log.calls(), vec!["mw:root".to_string(), "mw:home".to_string()]);
}

#[tokio::test]
async fn test_link_activity() {
    let router = common::sample_router();
    router.add_routes([
        RouteDefinition::new("users", "/users").with_is_active(|current| current.name == "user")
    ]);
    router.go_to(NavigationRequest::new("user").with_param("id", "5")).await.unwrap();

    assert!(router.is_active(&NavigationRequest::new("user").with_param("id", "5")));
    assert!(!router.is_active(&NavigationRequest::new("user").with_param("id", "6")));
    assert!(router.is_active(&NavigationRequest::new("users")));
    assert!(!router.is_active(&NavigationRequest::new("home")));
}

#[tokio::test]
async fn test_subscribers_see_consistent_snapshots() {
    let router = common::sample_router();
    let mut changes = router.subscribe();

    router.go_to(NavigationRequest::new("home")).await.unwrap();
    router.go_to(NavigationRequest::new("user").with_param("id", "3")).await.unwrap();
    router.back().await.unwrap();

    for _ in 0..3 {
        let change = changes.recv().await.unwrap();
        let info = change.state.route_info().expect("route_info present");
        assert_eq!(Some(info.name()), change.state.name());
    }
}

#[tokio::test]
async fn test_concurrent_navigations_apply_in_issue_order() {
    let router = Arc::new(common::sample_router());
    common::install_delay(&router);

    let slow = router.go_to(
        NavigationRequest::new("user")
            .with_param("id", "1")
            .with_param("delay", "40"),
    );
    let fast = router.go_to(NavigationRequest::new("user").with_param("id", "2"));
    let (slow, fast) = tokio::join!(slow, fast);
    slow.unwrap();
    fast.unwrap();

    let ids: Vec<String> = router
        .history()
        .into_iter()
        .map(|e| e.params["id"].clone())
        .collect();
    assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
    assert_eq!(router.current_route().unwrap().params["id"], "2");
}

#[tokio::test]
async fn test_burst_of_navigations_commits_each_once_in_order() {
    let router = Arc::new(common::sample_router());
    common::install_delay(&router);
    let mut changes = router.subscribe();

    // Earlier requests sleep longer, so any reordering would show up
    let requests = (1..=5).map(|id| {
        NavigationRequest::new("user")
            .with_param("id", id.to_string())
            .with_param("delay", ((6 - id) * 10).to_string())
    });
    let results = join_all(requests.map(|request| router.go_to(request))).await;

    let resolved: Vec<String> = results
        .into_iter()
        .map(|result| result.unwrap().params["id"].clone())
        .collect();
    assert_eq!(resolved, vec!["1", "2", "3", "4", "5"]);

    let ids: Vec<String> = router
        .history()
        .into_iter()
        .map(|e| e.params["id"].clone())
        .collect();
    assert_eq!(ids, resolved);

    for id in &resolved {
        let change = changes.recv().await.unwrap();
        assert_eq!(change.kind, ChangeKind::Forward);
        assert_eq!(change.state.params()["id"], *id);
    }
    assert!(changes.try_recv().is_err());
}
