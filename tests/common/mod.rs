//! Shared fixtures for integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use route_navigator::middleware::MiddlewareOutcome;
use route_navigator::navigation::{NavigationRequest, Router};
use route_navigator::routing::RouteDefinition;

/// Router with the `home` and `user` routes.
#[allow(dead_code)]
pub fn sample_router() -> Router {
    let router = Router::new();
    router.add_routes([
        RouteDefinition::new("home", "/"),
        RouteDefinition::new("user", "/user/:id"),
    ]);
    router
}

/// Records the name of every request a middleware sees.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Install a pass-through middleware on `router` that logs into this log.
    #[allow(dead_code)]
    pub fn install(&self, router: &Router, label: &'static str) {
        let calls = self.calls.clone();
        router.add_middleware(move |req: NavigationRequest| {
            calls.lock().unwrap().push(format!("{}:{}", label, req.name));
            async { MiddlewareOutcome::Continue }
        });
    }
}

/// Middleware that sleeps for `delay` ms (taken from the request params).
#[allow(dead_code)]
pub fn install_delay(router: &Router) {
    router.add_middleware(|req: NavigationRequest| async move {
        let delay = req
            .params
            .get("delay")
            .and_then(|d| d.parse::<u64>().ok())
            .unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        MiddlewareOutcome::Continue
    });
}
