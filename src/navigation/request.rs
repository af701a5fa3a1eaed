//! Navigation request and resolved route types.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::routing::table::{RouteDefinition, RouteMeta};
use crate::state::history::HistoryEntry;

/// Route params. Ordered so that equality and output are deterministic.
pub type Params = BTreeMap<String, String>;

/// The `{name, params}` pair a caller wants to navigate to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub name: String,

    #[serde(default)]
    pub params: Params,
}

impl NavigationRequest {
    /// Request a route with no params.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Final result of a navigation: identity plus the definition it resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub name: String,
    pub params: Params,
    pub route_info: Arc<RouteDefinition>,
}

impl ResolvedRoute {
    pub fn meta(&self) -> &RouteMeta {
        self.route_info.meta()
    }

    /// The identity recorded in history for this route.
    pub fn entry(&self) -> HistoryEntry {
        HistoryEntry {
            name: self.name.clone(),
            params: self.params.clone(),
        }
    }
}

impl PartialEq for ResolvedRoute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.params == other.params
            && Arc::ptr_eq(&self.route_info, &other.route_info)
    }
}
