//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → NavigatorConfig (validated, immutable)
//!     → Router::from_config (route table, redirect depth, default route)
//!
//! On file change (--watch):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → watcher.rs diffs routes against the ones already sent
//!     → added / overridden routes merged into the live table (never removed)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{NavigationConfig, NavigatorConfig, ObservabilityConfig, RouteConfig};
pub use validation::ValidationError;
pub use watcher::{ConfigWatcher, KnownRoutes, RouteUpdate};
