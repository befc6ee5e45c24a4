//! View subsystem.
//!
//! # Data Flow
//! ```text
//! RouteMatch.view (ViewRef)
//!     → Eager: view available immediately
//!     → Lazy:  lazy.rs checks the single-write cell
//!         → cached: return it
//!         → empty:  spawn load task → loader.rs (ViewLoader) → fill cell
//! ```
//!
//! # Design Decisions
//! - One cache cell per lazy route, written at most once
//! - Concurrent first loads share one in-flight load and its outcome
//! - A failed load leaves the cell empty; a navigation started after it retries
//! - A started load finishes in its own task even if the caller goes away
//! - No automatic retries

pub mod error;
pub mod lazy;
pub mod loader;
pub mod view;

pub use error::LoadError;
pub use lazy::LazyView;
pub use loader::{is_component_name, ChunkDirLoader, ViewLoader};
pub use view::{View, ViewRef};
