//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! go_to(request)                         back()
//!     → router.rs (wait for turn)            → router.rs (wait for turn)
//!     → engine.rs                            → history pop (Empty if none)
//!         → middleware pipeline              → state update (Back)
//!         → route table lookup
//!         → redirects (bounded)
//!     → state update (Forward)
//!     → history push
//!     → ResolvedRoute
//! ```
//!
//! # Design Decisions
//! - Resolution (engine) is separate from committing (router)
//! - Failures are typed (`NavigationError`) and terminal

pub mod engine;
pub mod error;
pub mod request;
pub mod router;

pub use engine::{NavigationEngine, DEFAULT_MAX_REDIRECT_DEPTH};
pub use error::{ErrorKind, NavigationError, NavigationResult};
pub use request::{NavigationRequest, Params, ResolvedRoute};
pub use router::Router;
