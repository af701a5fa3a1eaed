//! Navigation middleware.
//!
//! # Data Flow
//! ```text
//! NavigationRequest
//!     → middleware #0 → Continue | Override(request) | Reject
//!     → middleware #1 (sees the possibly overridden request)
//!     → ...
//!     → request handed to route lookup, or Rejected
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: each middleware is awaited before the next starts
//! - Append-only registration, order = registration order
//! - Three-variant outcome instead of an untyped return value

use std::future::Future;

use async_trait::async_trait;

use crate::navigation::request::NavigationRequest;

pub mod guard;
pub mod pipeline;

pub use guard::{guard, Guard};
pub use pipeline::MiddlewarePipeline;

/// What a middleware decided about a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareOutcome {
    /// Pass the request through unchanged.
    Continue,
    /// Replace the request (name and params) for everything downstream.
    Override(NavigationRequest),
    /// Stop the navigation.
    Reject,
}

/// An async gate/transform run before a navigation is finalized.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: &NavigationRequest) -> MiddlewareOutcome;
}

/// Any `async fn(NavigationRequest) -> MiddlewareOutcome` closure is a middleware.
#[async_trait]
impl<F, Fut> Middleware for F
where
    F: Fn(NavigationRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MiddlewareOutcome> + Send + 'static,
{
    async fn handle(&self, request: &NavigationRequest) -> MiddlewareOutcome {
        (self)(request.clone()).await
    }
}
