//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), or RouterConfig::default()
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → RouteTable::from_config (built once at startup)
//! ```
//!
//! # Design Decisions
//! - Config is read once; there is no hot reload of the route table
//! - All fields have defaults; the default route table is the application's
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
pub use schema::ViewsConfig;
