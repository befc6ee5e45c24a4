//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation (path string from the host)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (segment-by-segment structural match)
//!     → Return: RouteMatch { name, params, view handle } or NotFound
//!
//! Route Table Construction (at startup):
//!     RouteConfig[] / Route[]
//!     → Parse templates into segments
//!     → Reject duplicate names (fail fast, no partial table)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes built once at startup, immutable afterwards
//! - Declaration order is authoritative: first structural match wins
//! - No specificity scoring, no regex
//! - Errors are returned to the caller, never logged here

pub mod error;
pub mod location;
pub mod matcher;
pub mod params;
pub mod router;

pub use error::{ConfigurationError, RouterError, RouterResult};
pub use location::Location;
pub use matcher::{PathPattern, ReverseError};
pub use params::Params;
pub use router::{Route, RouteMatch, RouteTable};
