//! Client-side navigation engine for single-page applications.

pub mod config;
pub mod middleware;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod state;

pub use config::schema::NavigatorConfig;
pub use middleware::{Middleware, MiddlewareOutcome};
pub use navigation::{NavigationError, NavigationRequest, ResolvedRoute, Router};
pub use routing::{RouteDefinition, RouteTable};
pub use state::{HistoryEntry, RouteChange};
