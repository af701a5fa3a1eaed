//! Current route state and change notification.
//!
//! # Responsibilities
//! - Hold the source of truth: current `name` and `params`
//! - Derive `route_info` (and from it meta and the combined route)
//! - Notify observers once per navigation
//!
//! # Update Ordering
//! ```text
//! update(identity):
//!     look up route_info for identity.name
//!     → build RouteSnapshot { name, params, route_info }
//!     → publish snapshot (watch)          readers now see all three together
//!     → send one RouteChange (broadcast)  subscribers get the same snapshot
//! ```
//!
//! # Design Decisions
//! - Snapshots are replaced whole, so no reader sees a new name with an old route_info
//! - No dependency graph: one explicit `update` recomputes everything
//! - `refresh` follows route table merges without emitting a RouteChange

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::navigation::request::{Params, ResolvedRoute};
use crate::routing::table::{RouteDefinition, RouteMeta, RouteTable};
use crate::state::history::HistoryEntry;

/// Buffered change events per subscriber before the slowest one starts lagging.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Consistent view of the current route.
#[derive(Debug, Clone, Default)]
pub struct RouteSnapshot {
    name: Option<String>,
    params: Params,
    route_info: Option<Arc<RouteDefinition>>,
}

impl RouteSnapshot {
    /// Current route name; `None` before the first navigation.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn route_info(&self) -> Option<&Arc<RouteDefinition>> {
        self.route_info.as_ref()
    }

    /// Meta of the current definition, empty when there is none.
    pub fn meta(&self) -> RouteMeta {
        self.route_info
            .as_ref()
            .map(|info| info.meta().clone())
            .unwrap_or_default()
    }

    /// The combined `{name, params, route_info}` route.
    pub fn route(&self) -> Option<ResolvedRoute> {
        let name = self.name.clone()?;
        let route_info = self.route_info.clone()?;
        Some(ResolvedRoute {
            name,
            params: self.params.clone(),
            route_info,
        })
    }
}

/// How the route changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A resolved forward navigation (including the first route).
    Forward,
    /// Restored from history.
    Back,
}

/// One notification per logical navigation.
#[derive(Debug, Clone)]
pub struct RouteChange {
    pub kind: ChangeKind,
    pub state: RouteSnapshot,
}

/// Single-writer container for the current route.
#[derive(Debug)]
pub struct StateStore {
    table: Arc<RouteTable>,
    current: watch::Sender<RouteSnapshot>,
    changes: broadcast::Sender<RouteChange>,
}

impl StateStore {
    pub fn new(table: Arc<RouteTable>) -> Self {
        let (current, _) = watch::channel(RouteSnapshot::default());
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            table,
            current,
            changes,
        }
    }

    /// Adopt a new identity and publish every derived value in one step.
    pub fn update(&self, identity: HistoryEntry, kind: ChangeKind) -> RouteSnapshot {
        let route_info = self.table.get(&identity.name);
        if route_info.is_none() {
            tracing::warn!(route = %identity.name, "Route state has no matching definition");
        }

        let snapshot = RouteSnapshot {
            name: Some(identity.name),
            params: identity.params,
            route_info,
        };

        self.current.send_replace(snapshot.clone());
        // No subscribers is fine
        let _ = self.changes.send(RouteChange {
            kind,
            state: snapshot.clone(),
        });

        snapshot
    }

    /// Re-derive `route_info` after the route table changed.
    ///
    /// Returns whether the current definition was replaced.
    pub fn refresh(&self) -> bool {
        self.current.send_if_modified(|snapshot| {
            let Some(name) = snapshot.name.as_deref() else {
                return false;
            };
            let fresh = self.table.get(name);
            let unchanged = match (&snapshot.route_info, &fresh) {
                (Some(old), Some(new)) => Arc::ptr_eq(old, new),
                (None, None) => true,
                _ => false,
            };
            if unchanged {
                return false;
            }
            snapshot.route_info = fresh;
            true
        })
    }

    pub fn snapshot(&self) -> RouteSnapshot {
        self.current.borrow().clone()
    }

    pub fn route(&self) -> Option<ResolvedRoute> {
        self.current.borrow().route()
    }

    pub fn meta(&self) -> RouteMeta {
        self.current.borrow().meta()
    }

    /// Receiver that always holds the latest snapshot.
    pub fn watch(&self) -> watch::Receiver<RouteSnapshot> {
        self.current.subscribe()
    }

    /// Stream of route changes, one per navigation.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteChange> {
        self.changes.subscribe()
    }
}
