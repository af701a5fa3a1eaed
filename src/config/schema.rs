//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the navigator.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::navigation::engine::DEFAULT_MAX_REDIRECT_DEPTH;
use crate::navigation::request::{NavigationRequest, Params};
use crate::routing::table::{Redirect, RouteDefinition, RouteMeta};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Navigation engine settings.
    pub navigation: NavigationConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Route definitions.
    pub routes: Vec<RouteConfig>,
}

impl NavigatorConfig {
    /// Route definitions ready to merge into a route table.
    pub fn route_definitions(&self) -> Vec<RouteDefinition> {
        self.routes.iter().map(RouteConfig::to_definition).collect()
    }
}

/// Navigation engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum redirect hops before a navigation fails as a loop.
    pub max_redirect_depth: usize,

    /// Route used for the first navigation when the URL binding has none.
    pub default_route: Option<String>,

    /// Params for the default route.
    pub default_params: Params,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_redirect_depth: DEFAULT_MAX_REDIRECT_DEPTH,
            default_route: None,
            default_params: Params::new(),
        }
    }
}

impl NavigationConfig {
    /// The first-route request, if a default route is configured.
    pub fn default_request(&self) -> Option<NavigationRequest> {
        self.default_route.as_ref().map(|name| {
            NavigationRequest::new(name.clone()).with_params(self.default_params.clone())
        })
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,

    /// Record navigation counters through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

/// A route as written in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Unique route name.
    pub name: String,

    /// Path pattern handed to the URL binding.
    #[serde(default)]
    pub path: String,

    /// Forward resolution to another route.
    #[serde(default)]
    pub redirect: Option<Redirect>,

    /// Extra metadata fields.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl RouteConfig {
    pub fn to_definition(&self) -> RouteDefinition {
        let definition =
            RouteDefinition::new(self.name.clone(), self.path.clone()).with_meta(RouteMeta {
                path: self.path.clone(),
                extra: self.meta.clone(),
            });
        match &self.redirect {
            Some(redirect) => {
                definition.redirect_to(redirect.name.clone(), redirect.params.clone())
            }
            None => definition,
        }
    }
}
