//! Ordered middleware execution.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::middleware::{Middleware, MiddlewareOutcome};
use crate::navigation::error::{NavigationError, NavigationResult};
use crate::navigation::request::NavigationRequest;

/// Append-only sequence of middlewares.
///
/// A run works on the list as it was when the run started; middlewares
/// registered meanwhile apply from the next navigation on.
pub struct MiddlewarePipeline {
    middlewares: ArcSwap<Vec<Arc<dyn Middleware>>>,
}

impl std::fmt::Debug for MiddlewarePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewarePipeline")
            .field("middlewares", &self.len())
            .finish()
    }
}

impl Default for MiddlewarePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MiddlewarePipeline {
    pub fn new() -> Self {
        Self {
            middlewares: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Append a middleware. Registering the same one twice runs it twice.
    pub fn register(&self, middleware: Arc<dyn Middleware>) {
        self.middlewares.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push(Arc::clone(&middleware));
            next
        });
    }

    pub fn len(&self) -> usize {
        self.middlewares.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.load().is_empty()
    }

    /// Run `request` through every middleware in order.
    ///
    /// Returns the request as it stands after the last middleware, or
    /// `Rejected` as soon as one of them vetoes it.
    pub async fn run(&self, request: NavigationRequest) -> NavigationResult<NavigationRequest> {
        let middlewares = self.middlewares.load_full();
        let mut current = request;

        for (index, middleware) in middlewares.iter().enumerate() {
            match middleware.handle(&current).await {
                MiddlewareOutcome::Continue => {}
                MiddlewareOutcome::Override(next) => {
                    tracing::debug!(
                        index,
                        from = %current.name,
                        to = %next.name,
                        "Middleware overrode navigation request"
                    );
                    current = next;
                }
                MiddlewareOutcome::Reject => {
                    tracing::warn!(
                        index,
                        route = %current.name,
                        "Navigation rejected by middleware"
                    );
                    return Err(NavigationError::Rejected { name: current.name });
                }
            }
        }

        Ok(current)
    }
}
