//! Access guard middleware.
//! Rejects or reroutes requests that fail a synchronous check.

use async_trait::async_trait;

use crate::middleware::{Middleware, MiddlewareOutcome};
use crate::navigation::request::NavigationRequest;

/// Middleware built from a plain predicate.
///
/// When the predicate fails the request is rejected, or sent to `fallback`
/// if one is set (e.g. a login route).
pub struct Guard<P> {
    predicate: P,
    fallback: Option<NavigationRequest>,
}

/// Build a guard that rejects every request for which `predicate` is false.
pub fn guard<P>(predicate: P) -> Guard<P>
where
    P: Fn(&NavigationRequest) -> bool + Send + Sync,
{
    Guard {
        predicate,
        fallback: None,
    }
}

impl<P> Guard<P> {
    /// Reroute failing requests instead of rejecting them.
    pub fn or_redirect(mut self, fallback: NavigationRequest) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

#[async_trait]
impl<P> Middleware for Guard<P>
where
    P: Fn(&NavigationRequest) -> bool + Send + Sync,
{
    async fn handle(&self, request: &NavigationRequest) -> MiddlewareOutcome {
        if (self.predicate)(request) {
            return MiddlewareOutcome::Continue;
        }

        match &self.fallback {
            // Already heading to the fallback: let it through
            Some(fallback) if fallback.name == request.name => MiddlewareOutcome::Continue,
            Some(fallback) => {
                tracing::debug!(
                    route = %request.name,
                    fallback = %fallback.name,
                    "Guard rerouted navigation"
                );
                MiddlewareOutcome::Override(fallback.clone())
            }
            None => MiddlewareOutcome::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_rejects() {
        let g = guard(|req: &NavigationRequest| req.name != "admin");
        assert_eq!(g.handle(&NavigationRequest::new("home")).await, MiddlewareOutcome::Continue);
        assert_eq!(g.handle(&NavigationRequest::new("admin")).await, MiddlewareOutcome::Reject);
    }

    #[tokio::test]
    async fn test_guard_redirects_to_fallback() {
        let g = guard(|_: &NavigationRequest| false).or_redirect(NavigationRequest::new("login"));

        assert_eq!(
            g.handle(&NavigationRequest::new("admin")).await,
            MiddlewareOutcome::Override(NavigationRequest::new("login"))
        );
        assert_eq!(g.handle(&NavigationRequest::new("login")).await, MiddlewareOutcome::Continue);
    }
}
