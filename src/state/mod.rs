//! Route state subsystem.
//!
//! # Data Flow
//! ```text
//! Forward navigation (resolved):
//!     ResolvedRoute → store.rs update(Forward) → history.rs push
//!
//! Back navigation:
//!     history.rs pop → store.rs update(Back)
//!     (no middleware, no redirect resolution)
//! ```
//!
//! # Design Decisions
//! - The store keeps only identity; everything else is derived on update
//! - History keeps identities only; definitions are looked up on restore
//! - Back navigation never pushes history

pub mod history;
pub mod store;

pub use history::{HistoryEntry, HistoryStack};
pub use store::{ChangeKind, RouteChange, RouteSnapshot, StateStore};
