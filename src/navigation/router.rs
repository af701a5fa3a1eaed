//! The router instance.
//!
//! # Responsibilities
//! - Own the route table, middleware pipeline, state store and history
//! - Commit resolved navigations (state update, then history push)
//! - Restore history entries on back navigation
//! - Answer link-activity questions for the view layer
//!
//! # Design Decisions
//! - One explicit instance instead of process-wide globals
//! - Navigations are serialized: each `go_to`/`back` runs to completion, in
//!   the order issued, before the next one starts
//! - Failed navigations leave state and history untouched

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, watch, Mutex};

use crate::config::schema::NavigatorConfig;
use crate::middleware::{Middleware, MiddlewarePipeline};
use crate::navigation::engine::NavigationEngine;
use crate::navigation::error::{NavigationError, NavigationResult};
use crate::navigation::request::{NavigationRequest, ResolvedRoute};
use crate::observability::metrics::{NavigationMetrics, OUTCOME_OK};
use crate::routing::activity;
use crate::routing::table::{RouteDefinition, RouteMeta, RouteTable};
use crate::state::{
    ChangeKind, HistoryEntry, HistoryStack, RouteChange, RouteSnapshot, StateStore,
};

/// Client-side navigation engine.
///
/// Middlewares must not call `go_to`/`back` on the router running them: the
/// call would wait behind the navigation that is invoking the middleware.
#[derive(Debug)]
pub struct Router {
    table: Arc<RouteTable>,
    pipeline: Arc<MiddlewarePipeline>,
    engine: NavigationEngine,
    store: StateStore,
    history: HistoryStack,
    metrics: NavigationMetrics,
    /// FIFO turn for navigations.
    queue: Mutex<()>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router with an empty table and pipeline.
    pub fn new() -> Self {
        let table = Arc::new(RouteTable::new());
        let pipeline = Arc::new(MiddlewarePipeline::new());
        Self {
            engine: NavigationEngine::new(table.clone(), pipeline.clone()),
            store: StateStore::new(table.clone()),
            history: HistoryStack::new(),
            metrics: NavigationMetrics::default(),
            queue: Mutex::new(()),
            table,
            pipeline,
        }
    }

    /// Create a router from configuration (routes, redirect depth, metrics switch).
    pub fn from_config(config: &NavigatorConfig) -> Self {
        let router = Self::new()
            .with_max_redirect_depth(config.navigation.max_redirect_depth)
            .with_metrics(NavigationMetrics::new(config.observability.metrics_enabled));
        router.add_routes(config.route_definitions());
        router
    }

    pub fn with_max_redirect_depth(mut self, depth: usize) -> Self {
        self.engine = self.engine.with_max_redirect_depth(depth);
        self
    }

    pub fn with_metrics(mut self, metrics: NavigationMetrics) -> Self {
        self.engine = self.engine.with_metrics(metrics);
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> NavigationMetrics {
        self.metrics
    }

    /// Merge route definitions into the table.
    pub fn add_routes<I>(&self, routes: I)
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let added = self.table.add(routes);
        if added > 0 && self.store.refresh() {
            tracing::debug!("Current route definition replaced");
        }
    }

    /// Append a middleware to the pipeline.
    pub fn add_middleware<M>(&self, middleware: M)
    where
        M: Middleware + 'static,
    {
        self.pipeline.register(Arc::new(middleware));
    }

    /// Navigate to the first route, through the same path as any navigation.
    pub async fn init_first_route(
        &self,
        request: NavigationRequest,
    ) -> NavigationResult<ResolvedRoute> {
        tracing::info!(route = %request.name, "Initializing first route");
        self.go_to(request).await
    }

    /// Navigate to the configured default route, if there is one.
    pub async fn init_from_config(
        &self,
        config: &NavigatorConfig,
    ) -> NavigationResult<Option<ResolvedRoute>> {
        match config.navigation.default_request() {
            Some(request) => self.init_first_route(request).await.map(Some),
            None => Ok(None),
        }
    }

    /// Resolve and commit a forward navigation.
    pub async fn go_to(&self, request: NavigationRequest) -> NavigationResult<ResolvedRoute> {
        let _turn = self.queue.lock().await;

        tracing::debug!(
            route = %request.name,
            params = ?request.params,
            "Navigation requested"
        );

        let resolved = match self.engine.navigate(request).await {
            Ok(resolved) => resolved,
            Err(e) => {
                self.metrics.record_navigation(e.kind().as_str());
                return Err(e);
            }
        };

        let entry = resolved.entry();
        self.store.update(entry.clone(), ChangeKind::Forward);
        let depth = self.history.push(entry);

        self.metrics.record_navigation(OUTCOME_OK);
        self.metrics.set_history_depth(depth);
        tracing::info!(
            route = %resolved.name,
            path = %resolved.route_info.path(),
            history_depth = depth,
            "Navigation complete"
        );

        Ok(resolved)
    }

    /// Pop the newest history entry and restore it as the current route.
    ///
    /// Runs no middleware and follows no redirects.
    pub async fn back(&self) -> NavigationResult<HistoryEntry> {
        let _turn = self.queue.lock().await;

        let Some(entry) = self.history.pop() else {
            tracing::warn!("Back navigation with empty history");
            self.metrics.record_back(NavigationError::Empty.kind().as_str());
            return Err(NavigationError::Empty);
        };

        self.store.update(entry.clone(), ChangeKind::Back);

        let depth = self.history.len();
        self.metrics.record_back(OUTCOME_OK);
        self.metrics.set_history_depth(depth);
        tracing::info!(
            route = %entry.name,
            history_depth = depth,
            "Restored route from history"
        );

        Ok(entry)
    }

    /// The combined current route, `None` before the first navigation.
    pub fn current_route(&self) -> Option<ResolvedRoute> {
        self.store.route()
    }

    pub fn snapshot(&self) -> RouteSnapshot {
        self.store.snapshot()
    }

    /// Meta of the current route (empty when there is none).
    pub fn meta(&self) -> RouteMeta {
        self.store.meta()
    }

    /// Whether a link to `target` is active for the current route.
    pub fn is_active(&self, target: &NavigationRequest) -> bool {
        activity::is_active(&self.table, self.store.route().as_ref(), target)
    }

    /// All registered routes, for rendering navigable targets.
    pub fn routes(&self) -> Arc<HashMap<String, Arc<RouteDefinition>>> {
        self.table.snapshot()
    }

    pub fn route(&self, name: &str) -> Option<Arc<RouteDefinition>> {
        self.table.get(name)
    }

    /// History entries, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    pub fn middleware_count(&self) -> usize {
        self.pipeline.len()
    }

    /// Route change notifications, one per navigation.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteChange> {
        self.store.subscribe()
    }

    /// Receiver holding the latest route snapshot.
    pub fn watch(&self) -> watch::Receiver<RouteSnapshot> {
        self.store.watch()
    }
}
