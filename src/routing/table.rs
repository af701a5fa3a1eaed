//! Route definitions and the route table.
//!
//! # Responsibilities
//! - Describe a named destination (meta, optional redirect, optional activity predicate)
//! - Store definitions keyed by name
//! - Merge new definitions without disturbing unrelated ones
//!
//! # Design Decisions
//! - Copy-on-write merge published through `ArcSwap` (lock-free reads)
//! - Definitions are shared as `Arc<RouteDefinition>` and never mutated in place
//! - Name collisions are resolved last-write-wins

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::navigation::request::{Params, ResolvedRoute};

/// Custom activity check supplied by a route definition.
pub type ActivePredicate = Arc<dyn Fn(&ResolvedRoute) -> bool + Send + Sync>;

/// Route metadata: the path pattern plus arbitrary application fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Path pattern owned by the URL binding (e.g. `/user/:id`).
    #[serde(default)]
    pub path: String,

    /// Any other fields (titles, layout hints, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteMeta {
    /// Create metadata with only a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extra: Map::new(),
        }
    }
}

/// Forwarding target of a redirecting route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Route name to resolve instead.
    pub name: String,

    /// Params for the target route.
    #[serde(default)]
    pub params: Params,
}

/// A single named route.
#[derive(Clone)]
pub struct RouteDefinition {
    name: String,
    meta: RouteMeta,
    redirect: Option<Redirect>,
    is_active: Option<ActivePredicate>,
}

impl std::fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .field("redirect", &self.redirect)
            .field("has_is_active", &self.is_active.is_some())
            .finish()
    }
}

impl RouteDefinition {
    /// Create a route with the given name and path pattern.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta: RouteMeta::new(path),
            redirect: None,
            is_active: None,
        }
    }

    /// Replace the whole metadata block.
    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Add a single extra metadata field.
    pub fn with_meta_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.extra.insert(key.into(), value.into());
        self
    }

    /// Make this route forward to another one.
    pub fn redirect_to(mut self, name: impl Into<String>, params: Params) -> Self {
        self.redirect = Some(Redirect {
            name: name.into(),
            params,
        });
        self
    }

    /// Supply a custom activity predicate for links targeting this route.
    pub fn with_is_active<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ResolvedRoute) -> bool + Send + Sync + 'static,
    {
        self.is_active = Some(Arc::new(predicate));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &RouteMeta {
        &self.meta
    }

    pub fn path(&self) -> &str {
        &self.meta.path
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    pub fn is_active_predicate(&self) -> Option<&ActivePredicate> {
        self.is_active.as_ref()
    }
}

/// Name → definition table with atomic publish on merge.
#[derive(Debug)]
pub struct RouteTable {
    routes: ArcSwap<HashMap<String, Arc<RouteDefinition>>>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            routes: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Merge definitions into the table.
    ///
    /// Names not present in `routes` are kept; names present in both are
    /// overwritten. Returns the number of definitions merged.
    pub fn add<I>(&self, routes: I) -> usize
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let incoming: Vec<Arc<RouteDefinition>> = routes.into_iter().map(Arc::new).collect();
        if incoming.is_empty() {
            return 0;
        }

        self.routes.rcu(|current| {
            let mut next = HashMap::clone(current);
            for definition in &incoming {
                next.insert(definition.name.clone(), Arc::clone(definition));
            }
            next
        });

        tracing::debug!(added = incoming.len(), total = self.len(), "Route table updated");
        incoming.len()
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<Arc<RouteDefinition>> {
        self.routes.load().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.load().contains_key(name)
    }

    /// The currently published table, for enumerating navigable targets.
    pub fn snapshot(&self) -> Arc<HashMap<String, Arc<RouteDefinition>>> {
        self.routes.load_full()
    }

    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.load().is_empty()
    }
}

impl FromIterator<RouteDefinition> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteDefinition>>(iter: I) -> Self {
        let table = Self::new();
        table.add(iter);
        table
    }
}
