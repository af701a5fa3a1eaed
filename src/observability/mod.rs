//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, engine, pipeline, store produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges via the `metrics` facade)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (`route`, `depth`, `outcome`) rather than formatted strings
//! - Metrics are cheap no-ops until a recorder is installed, and skipped
//!   entirely when `metrics_enabled` is off
//! - Log level from config, overridable with `RUST_LOG`

pub mod logging;
pub mod metrics;
