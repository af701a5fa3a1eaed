//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup, or later merges):
//!     RouteDefinition[]
//!     → table.rs (merge into a copy, last write wins per name)
//!     → atomic publish of the new table
//!
//! Lookup (every navigation step):
//!     name → table.rs → Option<Arc<RouteDefinition>>
//!
//! Link activity (view layer):
//!     target + current route → activity.rs → bool
//! ```
//!
//! # Design Decisions
//! - Definitions are immutable once published; merges replace the whole table
//! - Readers always see a complete table, never a half-applied merge
//! - No path validation: path patterns belong to the URL binding

pub mod activity;
pub mod table;

pub use activity::is_active;
pub use table::{ActivePredicate, Redirect, RouteDefinition, RouteMeta, RouteTable};
