//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (redirects and the default route name real routes)
//! - Validate value ranges (redirect depth > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NavigatorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::NavigatorConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route '{0}' is defined more than once")]
    DuplicateRoute(String),

    #[error("route '{route}' redirects to undefined route '{target}'")]
    UnknownRedirectTarget { route: String, target: String },

    #[error("default route '{0}' is not defined")]
    UnknownDefaultRoute(String),

    #[error("navigation.max_redirect_depth must be greater than 0")]
    ZeroRedirectDepth,

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &NavigatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
    }

    for route in &config.routes {
        if let Some(redirect) = &route.redirect {
            if !names.contains(redirect.name.as_str()) {
                errors.push(ValidationError::UnknownRedirectTarget {
                    route: route.name.clone(),
                    target: redirect.name.clone(),
                });
            }
        }
    }

    if let Some(default_route) = &config.navigation.default_route {
        if !names.contains(default_route.as_str()) {
            errors.push(ValidationError::UnknownDefaultRoute(default_route.clone()));
        }
    }

    if config.navigation.max_redirect_depth == 0 {
        errors.push(ValidationError::ZeroRedirectDepth);
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
