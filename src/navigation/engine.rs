//! Navigation resolution.
//!
//! # Algorithm
//! ```text
//! navigate(request):
//!     request' = pipeline.run(request)          Rejected on veto
//!     def      = table.get(request'.name)       NotFound if absent
//!     if def.redirect:
//!         navigate(redirect.name, redirect.params)   pipeline and lookup run again
//!     else:
//!         { name, params, route_info: def }
//! ```
//!
//! # Design Decisions
//! - Redirect chains are followed iteratively with a hop counter
//! - More than `max_redirect_depth` hops is a RedirectLoop, never a hang
//! - Resolution has no side effects; committing is the router's job

use std::sync::Arc;

use crate::middleware::MiddlewarePipeline;
use crate::navigation::error::{NavigationError, NavigationResult};
use crate::navigation::request::{NavigationRequest, ResolvedRoute};
use crate::observability::metrics::NavigationMetrics;
use crate::routing::table::RouteTable;

/// Redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECT_DEPTH: usize = 8;

/// Resolves requests against the pipeline and the route table.
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    table: Arc<RouteTable>,
    pipeline: Arc<MiddlewarePipeline>,
    max_redirect_depth: usize,
    metrics: NavigationMetrics,
}

impl NavigationEngine {
    pub fn new(table: Arc<RouteTable>, pipeline: Arc<MiddlewarePipeline>) -> Self {
        Self {
            table,
            pipeline,
            max_redirect_depth: DEFAULT_MAX_REDIRECT_DEPTH,
            metrics: NavigationMetrics::default(),
        }
    }

    pub fn with_max_redirect_depth(mut self, depth: usize) -> Self {
        self.max_redirect_depth = depth;
        self
    }

    pub fn with_metrics(mut self, metrics: NavigationMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn max_redirect_depth(&self) -> usize {
        self.max_redirect_depth
    }

    /// Resolve `request` to a concrete route without touching any state.
    pub async fn navigate(&self, request: NavigationRequest) -> NavigationResult<ResolvedRoute> {
        let mut next = request;
        let mut hops = 0;

        loop {
            let request = self.pipeline.run(next).await?;

            let Some(definition) = self.table.get(&request.name) else {
                tracing::warn!(route = %request.name, "Navigation target not found");
                return Err(NavigationError::NotFound { name: request.name });
            };

            let Some(redirect) = definition.redirect() else {
                return Ok(ResolvedRoute {
                    name: request.name,
                    params: request.params,
                    route_info: definition,
                });
            };

            if hops >= self.max_redirect_depth {
                tracing::warn!(
                    route = %request.name,
                    depth = hops,
                    "Redirect depth exceeded"
                );
                return Err(NavigationError::RedirectLoop {
                    name: request.name,
                    depth: hops,
                });
            }

            hops += 1;
            self.metrics.record_redirect();
            tracing::debug!(
                from = %request.name,
                to = %redirect.name,
                hop = hops,
                "Following redirect"
            );

            next = NavigationRequest::new(redirect.name.clone())
                .with_params(redirect.params.clone());
        }
    }
}
