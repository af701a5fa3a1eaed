//! Navigation failure kinds.

use serde::Serialize;
use thiserror::Error;

/// Errors that end a navigation or back-navigation.
///
/// All of them are terminal: nothing is retried and the current route is left
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// A middleware vetoed the request.
    #[error("Navigation to '{name}' rejected by middleware")]
    Rejected { name: String },

    /// The resolved name has no route definition.
    #[error("Route '{name}' not found")]
    NotFound { name: String },

    /// Back navigation with nothing in history.
    #[error("History is empty")]
    Empty,

    /// Redirects kept going past the configured depth.
    #[error("Redirect loop at '{name}' after {depth} redirects")]
    RedirectLoop { name: String, depth: usize },
}

/// Stable failure code, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Rejected,
    NotFound,
    Empty,
    RedirectLoop,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Rejected => "REJECTED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Empty => "EMPTY",
            ErrorKind::RedirectLoop => "REDIRECT_LOOP",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NavigationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavigationError::Rejected { .. } => ErrorKind::Rejected,
            NavigationError::NotFound { .. } => ErrorKind::NotFound,
            NavigationError::Empty => ErrorKind::Empty,
            NavigationError::RedirectLoop { .. } => ErrorKind::RedirectLoop,
        }
    }
}

/// Result type for navigation operations.
pub type NavigationResult<T> = Result<T, NavigationError>;
