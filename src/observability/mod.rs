//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and view subsystems produce:
//!     → tracing events (structured fields, debug level)
//!     → metrics.rs (counters)
//!
//! The host binary installs:
//!     → logging.rs (subscriber with env filter)
//!     → optionally, a metrics recorder of its choice
//! ```
//!
//! # Design Decisions
//! - Library code only emits; subscribers and recorders belong to the host
//! - `RUST_LOG` overrides the configured level
//! - Errors are reported by the host, not logged where they are raised

pub mod logging;
pub mod metrics;
